//! Path conventions for the working directory and its contents

use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

/// Suffix appended to the input stem to name the working directory
pub const WORK_DIR_SUFFIX: &str = "_tmp";

/// Working directory for `input`: `<work_root>/<input stem>_tmp`
pub fn work_dir_for(input: &Path, work_root: &Path) -> PipelineResult<PathBuf> {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            PipelineError::BadArgs(format!(
                "Input path has no file name: {}",
                input.display()
            ))
        })?;
    Ok(work_root.join(format!("{}{}", stem, WORK_DIR_SUFFIX)))
}

/// Master file path, e.g. `movie_tmp/720p_movie.mkv` for a `1280x720` master
pub fn master_path(work_dir: &Path, input: &Path, resolution: &str) -> PipelineResult<PathBuf> {
    let name = file_name(input)?;
    let (_, height) = parse_resolution(resolution)?;
    Ok(work_dir.join(format!("{}p_{}", height, name)))
}

/// Staging name the master is encoded into before being moved into place
pub fn staging_path(master: &Path) -> PathBuf {
    let name = master
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    master.with_file_name(format!("partial_{}", name))
}

/// Manifest path, e.g. `movie_tmp/clips-clip.mp4.txt`
pub fn manifest_path(work_dir: &Path, output: &Path) -> PipelineResult<PathBuf> {
    let name = file_name(output)?;
    Ok(work_dir.join(format!("clips-{}.txt", name)))
}

/// Split `WxH` into its numeric parts
pub fn parse_resolution(resolution: &str) -> PipelineResult<(u32, u32)> {
    let invalid = || {
        PipelineError::BadArgs(format!(
            "Invalid resolution '{}'. Expected WIDTHxHEIGHT, e.g. 1280x720",
            resolution
        ))
    };
    let (w, h) = resolution.split_once('x').ok_or_else(invalid)?;
    let width: u32 = w.parse().map_err(|_| invalid())?;
    let height: u32 = h.parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

/// Resolve `path` against `base` unless it is already absolute
pub fn absolute_from(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn file_name(path: &Path) -> PipelineResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PipelineError::BadArgs(format!("Path has no file name: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_dir_uses_input_stem() {
        let dir = work_dir_for(Path::new("movie.mkv"), Path::new(".")).unwrap();
        assert_eq!(dir, Path::new(".").join("movie_tmp"));

        let nested = work_dir_for(Path::new("videos/holiday.final.mp4"), Path::new("/scratch")).unwrap();
        assert_eq!(nested, Path::new("/scratch/holiday.final_tmp"));
    }

    #[test]
    fn test_work_dir_requires_file_name() {
        assert!(work_dir_for(Path::new("/"), Path::new(".")).is_err());
    }

    #[test]
    fn test_master_path_uses_height() {
        let master = master_path(Path::new("movie_tmp"), Path::new("in/movie.mkv"), "1280x720").unwrap();
        assert_eq!(master, Path::new("movie_tmp/720p_movie.mkv"));
    }

    #[test]
    fn test_staging_path_keeps_extension() {
        let staged = staging_path(Path::new("movie_tmp/720p_movie.mkv"));
        assert_eq!(staged, Path::new("movie_tmp/partial_720p_movie.mkv"));
    }

    #[test]
    fn test_manifest_path() {
        let manifest = manifest_path(Path::new("movie_tmp"), Path::new("out/clip.mp4")).unwrap();
        assert_eq!(manifest, Path::new("movie_tmp/clips-clip.mp4.txt"));
    }

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("1920x1080").unwrap(), (1920, 1080));
        assert!(parse_resolution("1920").is_err());
        assert!(parse_resolution("0x720").is_err());
        assert!(parse_resolution("axb").is_err());
    }

    #[test]
    fn test_absolute_from() {
        assert_eq!(
            absolute_from(Path::new("/home/me"), Path::new("movie_tmp/0.mp4")),
            Path::new("/home/me/movie_tmp/0.mp4")
        );
        assert_eq!(
            absolute_from(Path::new("/home/me"), Path::new("/abs/0.mp4")),
            Path::new("/abs/0.mp4")
        );
    }
}
