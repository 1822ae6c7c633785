// File: ./src/cli.rs
//! Command-line argument handling and help text.
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub help: bool,
    pub root: Option<PathBuf>,
}

/// Parses the arguments after the binary name.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => parsed.help = true,
            "-r" | "--root" => {
                let dir = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a directory argument", arg))?;
                parsed.root = Some(PathBuf::from(dir));
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(parsed)
}

pub fn print_help(binary_name: &str) {
    println!(
        "Studytrack v{} - Personal academic task tracker",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config, data and log.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("MENU:");
    println!("    1  Add new task (exam, project or quick task)");
    println!("    2  List pending tasks, earliest due date first");
    println!("    3  Mark a listed task as completed");
    println!("    4  Show tasks due within the alert window (default 2 days)");
    println!("    5  Save tasks to the task file");
    println!("    6  Load tasks from the task file (replaces the current list)");
    println!("    0  Exit");
    println!();
    println!("FILES:");
    println!("    tareas.json           Task file in the working directory (or <root>/data)");
    println!("    config.toml           Optional settings: task_file, alert_window_days,");
    println!("                          strict_priority, log_level");
}
