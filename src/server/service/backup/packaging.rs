//! Bundles a snapshot into a downloadable zip archive.

use serde::Serialize;
use std::io::{Cursor, Write};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::server::{error::AppError, model::snapshot::Snapshot};

/// A packaged snapshot ready to be sent as a file.
#[derive(Debug, Clone)]
pub struct ExportedArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArchiveMetadata<'a> {
    id: &'a str,
    guild_id: String,
    guild_name: &'a str,
    kind: &'a str,
    description: Option<&'a str>,
    created_at: i64,
    size_bytes: u64,
}

/// Packages a snapshot as `backup.json`, `metadata.json` and `README.txt`.
///
/// # Returns
/// - `Ok(ExportedArchive)` - Archive named `backup-<guild-slug>-<id>.zip`
/// - `Err(AppError)` - Serialization or archive write failure
pub fn package(snapshot: &Snapshot) -> Result<ExportedArchive, AppError> {
    let payload = serde_json::to_vec_pretty(&snapshot.payload)?;
    let metadata = serde_json::to_vec_pretty(&ArchiveMetadata {
        id: &snapshot.id,
        guild_id: snapshot.guild_id.to_string(),
        guild_name: &snapshot.guild_name,
        kind: snapshot.kind.as_str(),
        description: snapshot.description.as_deref(),
        created_at: snapshot.created_at.timestamp_millis(),
        size_bytes: snapshot.size_bytes,
    })?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    writer.start_file("backup.json", options)?;
    writer.write_all(&payload)?;
    writer.start_file("metadata.json", options)?;
    writer.write_all(&metadata)?;
    writer.start_file("README.txt", options)?;
    writer.write_all(readme(snapshot).as_bytes())?;

    let bytes = writer.finish()?.into_inner();

    Ok(ExportedArchive {
        file_name: format!("backup-{}-{}.zip", slug(&snapshot.guild_name), snapshot.id),
        bytes,
    })
}

fn readme(snapshot: &Snapshot) -> String {
    format!(
        "Guild backup {id}\n\
         \n\
         Server: {guild} ({guild_id})\n\
         Type: {kind}\n\
         Created: {created}\n\
         Description: {description}\n\
         \n\
         backup.json holds the captured configuration ({roles} roles, {channels} channels,\n\
         {emojis} emojis). metadata.json describes the backup itself.\n\
         \n\
         Restoring only adds and updates roles and channels. Nothing in the server is deleted.\n\
         Use `/backup restore id:{id}` in the server to restore this backup.\n",
        id = snapshot.id,
        guild = snapshot.guild_name,
        guild_id = snapshot.guild_id,
        kind = snapshot.kind.label(),
        created = snapshot.created_at.format("%Y-%m-%d %H:%M UTC"),
        description = snapshot.description.as_deref().unwrap_or("none"),
        roles = snapshot.payload.roles().len(),
        channels = snapshot.payload.channels().len(),
        emojis = snapshot.payload.emojis().len(),
    )
}

/// Lowercase alphanumeric runs joined by `-`.
fn slug(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "guild".to_string()
    } else {
        slug
    }
}
