//! On-disk naming of sections and videos.
//!
//! `<CLASS>_<SS>_<Section>/<VV>_<Video>.mp4`, with `SS`/`VV` the 1-based
//! positions zero-padded to two digits. Names depend only on their inputs.

use std::path::{Path, PathBuf};

/// Extension given to every downloaded video.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Directory name for the section at 1-based `index`.
pub fn section_dir_name(class_name: &str, index: usize, section_name: &str) -> String {
    format!("{}_{:02}_{}", class_name.to_uppercase(), index, section_name)
}

/// File name for the video at 1-based `index` within its section.
pub fn video_file_name(index: usize, video_name: &str) -> String {
    format!("{:02}_{}.{}", index, video_name, VIDEO_EXTENSION)
}

/// Full target path of a video under `out_dir`.
pub fn target_path(
    out_dir: &Path,
    class_name: &str,
    section_index: usize,
    section_name: &str,
    video_index: usize,
    video_name: &str,
) -> PathBuf {
    out_dir
        .join(section_dir_name(class_name, section_index, section_name))
        .join(video_file_name(video_index, video_name))
}
