use crate::models::JobListing;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const CSV_HEADER: [&str; 5] = ["title", "company", "location", "url", "query"];

pub fn write_listings_csv<W: Write>(listings: &[JobListing], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for listing in listings {
        writer.write_record(listing.to_csv_record())?;
    }

    writer.flush()?;
    Ok(())
}

pub fn save_listings_to_csv(listings: &[JobListing], output_path: &str) -> Result<()> {
    let file = File::create(Path::new(output_path))
        .with_context(|| format!("Failed to create output file: {}", output_path))?;

    write_listings_csv(listings, file)
        .with_context(|| format!("Failed to write CSV to {}", output_path))?;

    println!("Saved {} listings to {}", listings.len(), output_path);
    Ok(())
}

pub fn save_listings_to_json(listings: &[JobListing], output_path: &str) -> Result<()> {
    let file = File::create(Path::new(output_path))
        .with_context(|| format!("Failed to create output file: {}", output_path))?;

    serde_json::to_writer_pretty(file, listings)
        .with_context(|| format!("Failed to write JSON to {}", output_path))?;

    println!("Saved {} listings to {}", listings.len(), output_path);
    Ok(())
}
