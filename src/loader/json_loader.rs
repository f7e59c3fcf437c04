// src/loader/json_loader.rs
use crate::animation::{Animation, ClipOption};
use crate::error::AnimationError;
use crate::spritesheet::Spritesheet;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Deserialize)]
struct JsonSheet {
    rows: usize,
    cols: usize,
    tile_width: u32,
    tile_height: u32,
}

#[derive(Deserialize)]
struct JsonClip {
    name: String,
    #[serde(default)]
    frames: Option<Vec<usize>>,
    #[serde(default)]
    row: Option<usize>,
    #[serde(default)]
    col: Option<usize>,
    #[serde(default)]
    cell: Option<usize>,
    #[serde(default = "one")]
    fps: u32,
    #[serde(default)]
    layer: i32,
    #[serde(default)]
    offset: [i32; 2],
}

fn one() -> u32 {
    1
}

#[derive(Deserialize)]
struct JsonManifest {
    sheet: JsonSheet,
    #[serde(default)]
    clips: Vec<JsonClip>,
    #[serde(default)]
    initial: Option<String>,
}

/// A sheet layout and the clips drawn from it, decoded from JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Grid layout of the texture.
    pub sheet: Spritesheet,
    /// Clips in file order, frames already checked against `sheet`.
    pub clips: Vec<Animation>,
    /// Clip to switch to once loaded.
    pub initial: Option<String>,
}

fn resolve_frames(sheet: &Spritesheet, clip: &JsonClip) -> Result<Vec<usize>, AnimationError> {
    let frames = match (&clip.frames, clip.row, clip.col, clip.cell) {
        (Some(frames), None, None, None) => frames.clone(),
        (None, Some(r), None, None) if r < sheet.rows() => sheet.row(r),
        (None, None, Some(c), None) if c < sheet.cols() => sheet.col(c),
        (None, Some(r), None, None) => {
            return Err(AnimationError::OutOfRange {
                index: sheet.index_of(r, 0),
                tile_count: sheet.tile_count(),
            });
        }
        (None, None, Some(c), None) => {
            return Err(AnimationError::OutOfRange {
                index: c,
                tile_count: sheet.tile_count(),
            });
        }
        (None, None, None, Some(i)) => sheet.cell(i),
        (None, None, None, None) => {
            return Err(AnimationError::InvalidManifest(format!(
                "clip '{}' needs one of frames, row, col or cell",
                clip.name
            )));
        }
        _ => {
            return Err(AnimationError::InvalidManifest(format!(
                "clip '{}' names more than one frame source",
                clip.name
            )));
        }
    };

    if frames.is_empty() {
        return Err(AnimationError::EmptyClip {
            name: clip.name.clone(),
        });
    }
    sheet.cells(frames)
}

fn clip_from_json(sheet: &Spritesheet, clip: JsonClip) -> Result<Animation, AnimationError> {
    if clip.name.is_empty() {
        return Err(AnimationError::UnnamedClip);
    }
    let frames = resolve_frames(sheet, &clip)?;
    let [ox, oy] = clip.offset;

    Ok(Animation::new(clip.name, frames).with_options(&[
        ClipOption::Fps(clip.fps),
        ClipOption::Layer(clip.layer),
        ClipOption::Offset(ox, oy),
    ]))
}

fn manifest_from_json(j: JsonManifest) -> Result<Manifest, AnimationError> {
    let sheet = Spritesheet::new(
        j.sheet.rows,
        j.sheet.cols,
        j.sheet.tile_width,
        j.sheet.tile_height,
    )?;

    let mut seen = HashSet::new();
    let mut clips = Vec::with_capacity(j.clips.len());
    for c in j.clips {
        let clip = clip_from_json(&sheet, c)?;
        if !seen.insert(clip.name().to_owned()) {
            log::debug!("manifest clip '{}' overrides an earlier entry", clip.name());
        }
        clips.push(clip);
    }

    if let Some(initial) = &j.initial {
        if !seen.contains(initial) {
            return Err(AnimationError::InvalidManifest(format!(
                "initial clip '{initial}' is not defined"
            )));
        }
    }

    Ok(Manifest {
        sheet,
        clips,
        initial: j.initial,
    })
}

/// Decodes a manifest held in memory. `origin` labels parse errors.
pub fn decode_manifest_str(txt: &str, origin: &Path) -> Result<Manifest, AnimationError> {
    let j: JsonManifest = serde_json::from_str(txt).map_err(|source| AnimationError::Json {
        path: origin.to_path_buf(),
        source,
    })?;
    manifest_from_json(j)
}

/// Reads and decodes a `.json` manifest file.
pub fn decode_manifest_file(path: impl AsRef<Path>) -> Result<Manifest, AnimationError> {
    let p = path.as_ref();
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(AnimationError::InvalidManifest(format!(
            "manifest must be a JSON file: {}",
            p.display()
        )));
    }

    let txt = std::fs::read_to_string(p).map_err(|source| AnimationError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    let manifest = decode_manifest_str(&txt, p)?;
    log::debug!(
        "loaded {} clips from {}",
        manifest.clips.len(),
        p.display()
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock went backwards")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("mq_sheet_anim_{nanos}"));
        fs::create_dir_all(&dir).expect("failed to create temp dir");
        dir
    }

    fn decode(txt: &str) -> Result<Manifest, AnimationError> {
        decode_manifest_str(txt, Path::new("inline.json"))
    }

    #[test]
    fn resolves_every_frame_source() {
        let m = decode(
            r#"{
              "sheet": {"rows": 3, "cols": 4, "tile_width": 16, "tile_height": 16},
              "clips": [
                {"name": "walk", "frames": [0, 1, 2], "fps": 8},
                {"name": "idle", "row": 1, "layer": 2, "offset": [1, -4]},
                {"name": "climb", "col": 2},
                {"name": "stand", "cell": 11, "fps": 0}
              ],
              "initial": "idle"
            }"#,
        )
        .expect("manifest should decode");

        assert_eq!(m.sheet.tile_count(), 12);
        assert_eq!(m.initial.as_deref(), Some("idle"));

        let frames: Vec<&[usize]> = m.clips.iter().map(|c| c.frames()).collect();
        assert_eq!(frames[0], &[0, 1, 2]);
        assert_eq!(frames[1], &[4, 5, 6, 7]);
        assert_eq!(frames[2], &[2, 6, 10]);
        assert_eq!(frames[3], &[11]);

        assert_eq!(m.clips[0].fps(), 8);
        assert_eq!(m.clips[1].fps(), 1);
        assert_eq!(m.clips[1].layer(), 2);
        assert_eq!(m.clips[1].offset(), (1, -4));
        assert_eq!(m.clips[3].fps(), 0);
    }

    #[test]
    fn ignores_unknown_fields() {
        let m = decode(
            r#"{
              "sheet": {"rows": 1, "cols": 1, "tile_width": 8, "tile_height": 8, "image": "x.png"},
              "clips": [{"name": "a", "cell": 0, "loop": true}],
              "version": 3
            }"#,
        )
        .unwrap();
        assert_eq!(m.clips.len(), 1);
        assert!(m.initial.is_none());
    }

    #[test]
    fn rejects_clip_without_frame_source() {
        let err = decode(
            r#"{"sheet": {"rows": 1, "cols": 2, "tile_width": 8, "tile_height": 8},
                "clips": [{"name": "a"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidManifest(_)));
    }

    #[test]
    fn rejects_clip_with_two_frame_sources() {
        let err = decode(
            r#"{"sheet": {"rows": 1, "cols": 2, "tile_width": 8, "tile_height": 8},
                "clips": [{"name": "a", "row": 0, "cell": 1}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidManifest(_)));
    }

    #[test]
    fn rejects_out_of_range_row() {
        let err = decode(
            r#"{"sheet": {"rows": 2, "cols": 2, "tile_width": 8, "tile_height": 8},
                "clips": [{"name": "a", "row": 2}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::OutOfRange { index: 4, .. }));
    }

    #[test]
    fn rejects_row_and_col_far_past_the_grid() {
        let err = decode(
            r#"{"sheet": {"rows": 2, "cols": 4, "tile_width": 8, "tile_height": 8},
                "clips": [{"name": "a", "row": 9223372036854775807}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::OutOfRange { tile_count: 8, .. }));

        let err = decode(
            r#"{"sheet": {"rows": 2, "cols": 4, "tile_width": 8, "tile_height": 8},
                "clips": [{"name": "a", "col": 18446744073709551615}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AnimationError::OutOfRange {
                index: usize::MAX,
                tile_count: 8
            }
        ));
    }

    #[test]
    fn rejects_oversized_sheet() {
        let err = decode(
            r#"{"sheet": {"rows": 1, "cols": 70000, "tile_width": 70000, "tile_height": 1}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidSheet(_)));
    }

    #[test]
    fn rejects_empty_frame_list() {
        let err = decode(
            r#"{"sheet": {"rows": 2, "cols": 2, "tile_width": 8, "tile_height": 8},
                "clips": [{"name": "a", "frames": []}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::EmptyClip { name } if name == "a"));
    }

    #[test]
    fn rejects_unknown_initial_clip() {
        let err = decode(
            r#"{"sheet": {"rows": 2, "cols": 2, "tile_width": 8, "tile_height": 8},
                "clips": [{"name": "a", "cell": 0}], "initial": "b"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidManifest(_)));
    }

    #[test]
    fn rejects_zero_sized_sheet() {
        let err = decode(r#"{"sheet": {"rows": 0, "cols": 2, "tile_width": 8, "tile_height": 8}}"#)
            .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidSheet(_)));
    }

    #[test]
    fn returns_typed_error_for_malformed_json() {
        let dir = temp_dir();
        let path = dir.join("clips.json");
        fs::write(&path, "{ not json").expect("failed to write manifest");

        let err = decode_manifest_file(&path).expect_err("expected decode error");
        assert!(matches!(err, AnimationError::Json { .. }));
    }

    #[test]
    fn returns_typed_error_for_missing_file() {
        let dir = temp_dir();
        let err = decode_manifest_file(dir.join("missing.json")).expect_err("expected io error");
        assert!(matches!(err, AnimationError::Io { .. }));
    }

    #[test]
    fn rejects_non_json_extension() {
        let err = decode_manifest_file("clips.toml").unwrap_err();
        assert!(matches!(err, AnimationError::InvalidManifest(_)));
    }

    #[test]
    fn reads_manifest_from_disk() {
        let dir = temp_dir();
        let path = dir.join("hero.json");
        let json = r#"{
          "sheet": {"rows": 2, "cols": 3, "tile_width": 24, "tile_height": 24},
          "clips": [{"name": "run", "row": 1, "fps": 12}]
        }"#;
        fs::write(&path, json).expect("failed to write manifest");

        let m = decode_manifest_file(&path).expect("manifest should load");
        assert_eq!(m.clips[0].frames(), &[3, 4, 5]);
        assert_eq!(m.sheet.tile_width(), 24);
    }
}
