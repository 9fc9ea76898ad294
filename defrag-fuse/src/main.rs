mod cli;
mod error;
mod image_file;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use defrag_fs::{Endian, Geometry, free_list};

pub use self::{cli::Cli, error::Error};

fn main() -> ExitCode {
    env_logger::init();

    match Cli::try_parse().map_err(usage).and_then(|cli| run(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(e)) => {
            let _ = e.print();
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `--help` 与 `--version` 不算错误
fn usage(e: clap::Error) -> Error {
    if !e.use_stderr() {
        e.exit();
    }
    Error::Usage(e)
}

fn run(cli: &Cli) -> Result<(), Error> {
    let endian = Endian::from(cli.byte_order);
    let image = image_file::read(&cli.image)?;
    log::info!("image={:?}, {} bytes, {endian:?} endian", cli.image, image.len());

    let (output, report) = defrag_fs::defragment(&image, endian)?;
    log::info!(
        "packed {} files ({} empty): {} data blocks + {} index blocks, {} blocks free",
        report.files,
        report.empty_files,
        report.data_blocks,
        report.index_blocks,
        report.free_blocks
    );
    if report.short_files > 0 {
        log::warn!(
            "{} files were shorter than their size, tails zero-filled",
            report.short_files
        );
    }

    if log::log_enabled!(log::Level::Debug) {
        let geo = Geometry::decode(&output, endian)?;
        let free = free_list::walk(&output, &geo).collect::<Result<Vec<_>, _>>()?;
        log::debug!("free list from {}: {} blocks", report.free_head, free.len());
    }

    image_file::write(Path::new(image_file::OUTPUT_FILE), &output)?;
    log::info!("wrote {}", image_file::OUTPUT_FILE);

    Ok(())
}
