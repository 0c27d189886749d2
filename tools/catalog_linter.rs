/// Catalog Linter — validates a catalog overrides file before use.
///
/// Usage: catalog_linter <catalog.ron> [--complete]
///
/// With `--complete`, the file must cover every genre and carry twists on
/// its own; otherwise it is checked as overrides for the built-in catalog.

use clap::Parser;
use std::collections::HashSet;
use std::path::PathBuf;
use std::process;

use story_loom::core::catalog::{CatalogError, CatalogOverrides, Pool};
use story_loom::schema::genre::Genre;

/// Pools smaller than this get a low-variety warning.
const MIN_RECOMMENDED_ENTRIES: usize = 3;

#[derive(Parser, Debug)]
#[command(name = "catalog_linter", version, about = "Validate a story catalog file")]
struct Args {
    /// Catalog file (RON)
    path: PathBuf,

    /// Require the file to be a complete catalog
    #[arg(long)]
    complete: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let overrides = match CatalogOverrides::load_from_ron(&args.path) {
        Ok(overrides) => overrides,
        Err(e) => {
            eprintln!("ERROR: Failed to load catalog file: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded {} genres and {} twists from {}",
        overrides.genres.len(),
        overrides.twists.len(),
        args.path.display()
    );

    let (errors, warnings) = lint_catalog(&overrides, args.complete);

    println!("\n=== Catalog Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    process::exit(exit_status(&errors));
}

fn exit_status(errors: &[String]) -> i32 {
    if errors.is_empty() {
        0
    } else {
        1
    }
}

fn lint_catalog(overrides: &CatalogOverrides, complete: bool) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if complete {
        for genre in Genre::ALL {
            if !overrides.genres.contains_key(&genre) {
                errors.push(format!(
                    "Not a complete catalog: {}",
                    CatalogError::MissingGenre(genre)
                ));
            }
        }
        if overrides.twists.is_empty() {
            errors.push(format!("Not a complete catalog: {}", CatalogError::MissingTwists));
        }
    } else if overrides.genres.is_empty() && overrides.twists.is_empty() {
        warnings.push("File overrides nothing".to_string());
    }

    for genre in Genre::ALL {
        let Some(templates) = overrides.genres.get(&genre) else {
            continue;
        };
        check_pool(&format!("{} openers", genre), &templates.openers, &mut warnings);
        check_pool(
            &format!("{} continuations", genre),
            &templates.continuations,
            &mut warnings,
        );
    }

    if !overrides.twists.is_empty() {
        match Pool::new(overrides.twists.clone()) {
            Ok(twists) => check_pool("twists", &twists, &mut warnings),
            Err(e) => errors.push(format!("Twist pool is invalid: {}", e)),
        }
    }

    (errors, warnings)
}

fn check_pool(label: &str, pool: &Pool, warnings: &mut Vec<String>) {
    let entries = pool.entries();
    if entries.len() < MIN_RECOMMENDED_ENTRIES {
        warnings.push(format!(
            "Pool '{}' has only {} entries (minimum {} recommended)",
            label,
            entries.len(),
            MIN_RECOMMENDED_ENTRIES
        ));
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.as_str()) {
            warnings.push(format!("Pool '{}' repeats entry '{}'", label, entry));
        }
    }
}
