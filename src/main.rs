// Kiln CLI entry point

use kiln::cli::CliHandler;

fn main() {
    let handler = CliHandler::new();

    if let Err(e) = handler.run() {
        eprintln!("{}", e.format_detailed());
        std::process::exit(1);
    }
}
