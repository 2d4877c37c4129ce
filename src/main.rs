use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use pixform::{
    collect_image_files, supported_output_formats, Cli, Commands, ConversionOptions,
    ConversionQueue, ItemStatus, OutputFormat, SUPPORTED_INPUT_TYPES,
};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Convert {
            inputs,
            format,
            quality,
            width,
            height,
            stretch,
            output,
            zip,
        } => run_convert(inputs, format, quality, width, height, stretch, output, zip),
        Commands::Formats => {
            print_formats();
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_convert(
    inputs: Vec<PathBuf>,
    format: OutputFormat,
    quality: f32,
    width: Option<u32>,
    height: Option<u32>,
    stretch: bool,
    output: Option<PathBuf>,
    zip: bool,
) -> anyhow::Result<()> {
    let files = expand_inputs(&inputs);
    anyhow::ensure!(!files.is_empty(), "no input files found");

    let mut queue = ConversionQueue::new();
    for path in &files {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        queue.add_file(name, bytes);
    }

    let options = ConversionOptions {
        format: format.into(),
        quality,
        width,
        height,
        maintain_aspect_ratio: !stretch,
    };

    let pb = create_progress_bar(queue.len());
    queue.convert_all(&options, |completed, _total| {
        pb.set_position(completed as u64);
    });
    pb.finish_and_clear();

    for item in queue.items() {
        if item.status == ItemStatus::Error {
            log::error!(
                "{}: {}",
                item.filename,
                item.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    let out_dir = output.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    if zip {
        match queue.download_all()? {
            Some(delivery) => {
                let path = out_dir.join(delivery.filename());
                std::fs::write(&path, delivery.bytes())
                    .with_context(|| format!("writing {}", path.display()))?;
                println!(
                    "Wrote {} ({})",
                    path.display(),
                    pixform::format_file_size(delivery.bytes().len() as u64)
                );
            }
            None => println!("No files were converted"),
        }
    } else {
        for item in queue.items() {
            if let Some(result) = &item.result {
                let path = out_dir.join(&result.filename);
                std::fs::write(&path, &result.bytes)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!(
                    "{} -> {} ({} -> {}, {}x{})",
                    item.filename,
                    path.display(),
                    pixform::format_file_size(result.original_size),
                    pixform::format_file_size(result.converted_size),
                    result.width,
                    result.height
                );
            }
        }
    }

    let (completed, total) = queue.progress();
    let failed = queue
        .items()
        .iter()
        .filter(|item| item.status == ItemStatus::Error)
        .count();

    println!(
        "Converted {} of {} files{}",
        completed - failed,
        total,
        if failed > 0 {
            format!(" ({} failed)", failed)
        } else {
            String::new()
        }
    );

    Ok(())
}

fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(collect_image_files(input));
        } else {
            files.push(input.clone());
        }
    }
    files
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

fn print_formats() {
    println!("Supported input media types:");
    for media_type in SUPPORTED_INPUT_TYPES {
        println!("  {}", media_type);
    }

    println!("Supported output formats:");
    for format in supported_output_formats() {
        println!("  {} ({})", format, format.media_type());
    }
}
