//! Sample a video every few seconds and print what was written.
//!
//! Usage:
//!   cargo run --example sample_video -- <input_file> [output_dir] [interval_seconds]

use std::error::Error;

use frame_sampler::{FrameSampler, SamplerOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| "input.mp4".to_string());
    let output_dir = args.next().unwrap_or_else(|| "video_frames".to_string());
    let interval: u64 = match args.next() {
        Some(value) => value.parse()?,
        None => 2,
    };

    println!("Sampling {input_path} every {interval}s into {output_dir}...");
    let sampler = FrameSampler::new(SamplerOptions::new().with_interval(interval));
    let report = sampler.run(&input_path, &output_dir)?;

    let properties = &report.properties;
    println!(
        "Video: {}x{}, {:.2} fps, {} frames ({:.2}s)",
        properties.width,
        properties.height,
        properties.frames_per_second,
        properties.frame_count,
        properties.duration_seconds(),
    );

    for frame in &report.extracted {
        println!(
            "  {:>4}s (frame {}) -> {}",
            frame.point.elapsed_seconds,
            frame.point.frame_number,
            frame.path.display()
        );
    }
    for skipped in &report.skipped {
        println!("  {:>4}s skipped: {}", skipped.point.elapsed_seconds, skipped.reason);
    }

    println!(
        "Done! Wrote {} of {} frame(s)",
        report.extracted_count(),
        report.plan.len()
    );
    Ok(())
}
