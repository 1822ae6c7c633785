use anyhow::Result;
use std::env;
use std::io;
use studytrack::cli;
use studytrack::config::Config;
use studytrack::context::StandardContext;
use studytrack::controller::TaskController;
use studytrack::logging;
use studytrack::store::TaskStore;

fn main() -> Result<()> {
    let args = match cli::parse_args(env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            cli::print_help("studytrack");
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help("studytrack");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root);

    let config = match Config::load_or_default(&ctx) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration:\n{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&ctx, config.log_level_filter()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let task_file = config.task_file_path(&ctx)?;
    log::info!("Starting with task file {}", task_file.display());

    let stdin = io::stdin();
    let mut controller = TaskController::new(
        TaskStore::new(),
        task_file,
        &config,
        stdin.lock(),
        io::stdout(),
    );
    controller.run()
}
