/// Catalog Linter — validates RON catalogs before they are used as an override.
///
/// Usage: catalog_linter <catalog.ron | catalog_dir>

use std::path::{Path, PathBuf};
use std::process;
use travel_buzz::core::lint::lint_catalog;
use travel_buzz::schema::catalog::Catalog;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: catalog_linter <catalog.ron | catalog_dir>");
        process::exit(0);
    }

    let target = Path::new(&args[1]);
    let paths = if target.is_file() {
        vec![target.to_path_buf()]
    } else if target.is_dir() {
        collect_ron_files(target)
    } else {
        eprintln!("ERROR: Path '{}' does not exist", args[1]);
        process::exit(1);
    };

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for path in &paths {
        println!("\n=== {} ===\n", path.display());

        let catalog = match Catalog::load_from_ron(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                println!("ERROR: {}", e);
                total_errors += 1;
                continue;
            }
        };

        let report = lint_catalog(&catalog);
        if report.is_clean() {
            println!("All checks passed!");
        }
        for warning in &report.warnings {
            println!("WARNING: {}", warning);
        }
        for error in &report.errors {
            println!("ERROR: {}", error);
        }

        total_errors += report.errors.len();
        total_warnings += report.warnings.len();
    }

    println!(
        "\nSummary: {} catalogs, {} errors, {} warnings",
        paths.len(),
        total_errors,
        total_warnings
    );

    if total_errors == 0 {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn collect_ron_files(dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                paths.extend(collect_ron_files(&path));
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                paths.push(path);
            }
        }
    }
    paths.sort();
    paths
}
