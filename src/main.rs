//! starter CLI entrypoint

use starter_cli::run_from_args;

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let exit_code = match run_from_args(&argv).await {
        Ok(()) => 0,
        Err(exit) => {
            if !exit.already_shown {
                eprintln!("{}", exit.message);
            }
            exit.exit_code
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    std::process::exit(exit_code);
}
