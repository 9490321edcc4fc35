//! Writes the six project thumbnails into the working directory.

use portfolio::rendering::generate_project_images;
use std::process::ExitCode;

fn main() -> ExitCode {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|l| l.log_to_stderr().start())
        .ok();

    match generate_project_images(".") {
        Ok(paths) => {
            for path in &paths {
                log::debug!("wrote {}", path.display());
            }
            println!("All project images created successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error generating images: {}", e);
            ExitCode::FAILURE
        }
    }
}
