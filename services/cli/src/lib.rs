mod cli;
mod render;

use devtrack::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
