use glob::glob;
use log::warn;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::types::{ClassMap, RemapStats, REMAP_SPLITS};

/// Rewrite every label file under `labels/<split>` in place, renumbering
/// classes through `map` and dropping lines whose class has no entry.
///
/// Splits without a labels directory are reported and skipped; everything
/// else is destructive and keeps no backups. Run it once per dataset: the
/// built-in table is not idempotent over its own output.
pub fn remap_labels(root: &Path, map: &ClassMap) -> io::Result<RemapStats> {
    let mut stats = RemapStats::default();
    for split in REMAP_SPLITS {
        let split_dir = root.join("labels").join(split);
        if !split_dir.exists() {
            warn!("Directory not found: {}", split_dir.display());
            continue;
        }
        let pattern = format!("{}/*.txt", split_dir.display());
        let label_files: Vec<PathBuf> = glob(&pattern)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
            .filter_map(|entry| entry.ok())
            .collect();
        for label_path in label_files {
            let content = fs::read_to_string(&label_path)?;
            let rewritten = remap_lines(&content, map, &mut stats)?;
            fs::write(&label_path, rewritten)?;
            stats.files_rewritten += 1;
        }
    }
    Ok(stats)
}

/// Filter and renumber YOLO label lines through `map`.
///
/// Blank lines are removed and whitespace collapses to single spaces. A
/// non-integer class token is an error; an integer class without a map
/// entry drops the whole line.
pub fn remap_lines(content: &str, map: &ClassMap, stats: &mut RemapStats) -> io::Result<String> {
    let mut out = String::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens: Vec<&str> = line.split_whitespace().collect();
        let class_id: i64 = tokens[0].parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid class token '{}': {}", tokens[0], e),
            )
        })?;
        match u32::try_from(class_id).ok().and_then(|id| map.get(id)) {
            Some(new_class) => {
                let new_class = new_class.to_string();
                tokens[0] = new_class.as_str();
                out.push_str(&tokens.join(" "));
                out.push('\n');
                stats.lines_kept += 1;
            }
            None => stats.lines_dropped += 1,
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saeta() -> ClassMap {
        ClassMap::visdrone_to_saeta()
    }

    #[test]
    fn renumbers_mapped_classes() {
        let mut stats = RemapStats::default();
        let out = remap_lines("3 0.5 0.5 0.1 0.1", &saeta(), &mut stats).unwrap();
        assert_eq!(out, "1 0.5 0.5 0.1 0.1\n");
        assert_eq!(stats.lines_kept, 1);
    }

    #[test]
    fn drops_unmapped_classes() {
        let mut stats = RemapStats::default();
        let out = remap_lines("5 0.5 0.5 0.1 0.1", &saeta(), &mut stats).unwrap();
        assert!(out.is_empty());
        assert_eq!(stats.lines_dropped, 1);
    }

    #[test]
    fn surviving_classes_stay_within_saeta_targets() {
        let mut stats = RemapStats::default();
        let content: String = (0..10)
            .map(|class| format!("{} 0.5 0.5 0.1 0.1\n", class))
            .collect();
        let out = remap_lines(&content, &saeta(), &mut stats).unwrap();
        assert_eq!(stats.lines_kept, 5);
        assert_eq!(stats.lines_dropped, 5);
        for line in out.lines() {
            let class: u32 = line.split_whitespace().next().unwrap().parse().unwrap();
            assert!([0, 1, 2, 4].contains(&class));
        }
    }

    #[test]
    fn normalizes_whitespace_and_removes_blank_lines() {
        let mut stats = RemapStats::default();
        let out = remap_lines("3   0.5\t0.5  0.1 0.1\n\n", &saeta(), &mut stats).unwrap();
        assert_eq!(out, "1 0.5 0.5 0.1 0.1\n");
    }

    #[test]
    fn non_integer_class_token_is_an_error() {
        let mut stats = RemapStats::default();
        assert!(remap_lines("car 0.5 0.5 0.1 0.1", &saeta(), &mut stats).is_err());
    }

    #[test]
    fn negative_class_is_dropped_not_fatal() {
        let mut stats = RemapStats::default();
        let out = remap_lines("-1 0.5 0.5 0.1 0.1", &saeta(), &mut stats).unwrap();
        assert!(out.is_empty());
        assert_eq!(stats.lines_dropped, 1);
    }

    #[test]
    fn second_remap_pass_alters_already_mapped_labels() {
        // The table's destination indices collide with its domain: a second
        // pass maps car (1) back to person (0) and drops motorcycle (2) and
        // bus (4). The remapper must run exactly once per dataset.
        let map = saeta();
        let mut stats = RemapStats::default();
        let content = "3 0.5 0.5 0.1 0.1\n9 0.2 0.2 0.1 0.1\n8 0.3 0.3 0.1 0.1\n";
        let once = remap_lines(content, &map, &mut stats).unwrap();
        assert_eq!(once, "1 0.5 0.5 0.1 0.1\n2 0.2 0.2 0.1 0.1\n4 0.3 0.3 0.1 0.1\n");
        let twice = remap_lines(&once, &map, &mut stats).unwrap();
        assert_eq!(twice, "0 0.5 0.5 0.1 0.1\n");
    }
}
