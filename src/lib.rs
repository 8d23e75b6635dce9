pub mod cli;
pub mod config;
pub mod cop;
pub mod diagnostic;
pub mod fix;
pub mod formatter;
pub mod fs;
pub mod linter;
pub mod parse;

#[cfg(test)]
pub mod testutil;

use std::io::Read;
use std::io::Write;

use anyhow::Result;

use cli::Args;
use config::load_config;
use cop::registry::CopRegistry;
use formatter::create_formatter;
use fs::discover_files;
use linter::{lint_source, run_linter};
use parse::source::SourceFile;

/// Run the linter. Returns the exit code: 0 = clean, 1 = offenses found.
pub fn run(args: Args) -> Result<i32> {
    let config = load_config(args.config.as_deref())?;
    let registry = CopRegistry::default_registry();
    config::schema::validate(&config, &registry)?;

    if args.debug {
        eprintln!("debug: {} cops registered", registry.len());
        eprintln!("debug: global excludes: {:?}", config.global_excludes());
    }

    // --list-cops: print all registered cop names and exit
    if args.list_cops {
        let mut cops: Vec<(&str, &str)> = registry
            .cops()
            .iter()
            .map(|c| (c.name(), c.description()))
            .collect();
        cops.sort();
        for (name, description) in cops {
            println!("{name}: {description}");
        }
        return Ok(0);
    }

    // --stdin: read from stdin and lint a single file
    if let Some(ref display_path) = args.stdin {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        let source = SourceFile::from_string(display_path.clone(), input);
        let (result, fixed_bytes) = lint_source(&source, &config, &registry, &args);
        let formatter = create_formatter(&args.format);
        formatter.print(&result.diagnostics, result.file_count);
        if let Some(bytes) = fixed_bytes {
            // The patched source goes to stdout after the report, the way
            // editor integrations expect it.
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(b"====================\n")?;
            lock.write_all(&bytes)?;
        }
        return if result.diagnostics.iter().all(|d| d.corrected) {
            Ok(0)
        } else {
            Ok(1)
        };
    }

    let files = discover_files(&args.paths, &config)?;

    if args.debug {
        eprintln!("debug: {} files to lint", files.len());
    }

    let result = run_linter(&files, &config, &registry, &args);
    let formatter = create_formatter(&args.format);
    formatter.print(&result.diagnostics, result.file_count);

    if result.diagnostics.iter().all(|d| d.corrected) {
        Ok(0)
    } else {
        Ok(1)
    }
}
