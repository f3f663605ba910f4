//! Catalog loading from CSV, with synthetic fallback

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use super::{generate_catalog, write_csv, Catalog, CatalogError};
use crate::models::{Song, SongId, SongProblem};

/// Where the catalog lives and how to synthesize one if it doesn't
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub path: PathBuf,
    /// Number of songs to generate when falling back
    pub size: usize,
    /// Fixed seed for reproducible generation
    pub seed: Option<u64>,
}

/// A CSV row that was skipped
#[derive(Debug, Clone, PartialEq)]
pub enum LoadProblem {
    /// Missing column or unparseable value
    Malformed { line: u64, message: String },
    Invalid {
        line: u64,
        id: SongId,
        problem: SongProblem,
    },
    DuplicateId { line: u64, id: SongId },
}

/// Songs accepted from a CSV file plus the rows that were rejected
#[derive(Debug, Default)]
pub struct LoadReport {
    pub songs: Vec<Song>,
    pub problems: Vec<LoadProblem>,
}

/// Reads and validates every row of a catalog CSV
///
/// Bad rows are reported rather than failing the whole file. Fails only if the
/// file can't be opened or yields no valid song at all.
pub fn read_csv(path: &Path) -> Result<LoadReport, CatalogError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut report = LoadReport::default();
    let mut seen: HashSet<SongId> = HashSet::new();

    for (row, result) in reader.deserialize::<Song>().enumerate() {
        // Line 1 is the header
        let line = row as u64 + 2;

        let song = match result {
            Ok(song) => song,
            Err(e) => {
                report.problems.push(LoadProblem::Malformed {
                    line,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if let Err(problem) = song.validate() {
            report.problems.push(LoadProblem::Invalid {
                line,
                id: song.id,
                problem,
            });
            continue;
        }

        if !seen.insert(song.id) {
            report
                .problems
                .push(LoadProblem::DuplicateId { line, id: song.id });
            continue;
        }

        report.songs.push(song);
    }

    if report.songs.is_empty() {
        return Err(CatalogError::NoValidSongs(path.to_path_buf()));
    }

    Ok(report)
}

/// Loads the catalog file, or generates one if it is missing or unusable
///
/// A generated catalog is persisted only when no file existed, so a broken
/// file is never overwritten.
pub fn load_or_generate(settings: &CatalogSettings) -> Result<Catalog, CatalogError> {
    let path = settings.path.as_path();
    let existed = path.exists();

    if existed {
        match read_csv(path) {
            Ok(report) => {
                if !report.problems.is_empty() {
                    warn!(
                        path = %path.display(),
                        skipped = report.problems.len(),
                        "Catalog file has rows that were skipped"
                    );
                    for problem in &report.problems {
                        warn!(?problem, "Skipped catalog row");
                    }
                }

                info!(
                    path = %path.display(),
                    songs = report.songs.len(),
                    "Catalog loaded"
                );
                return Catalog::new(report.songs);
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load catalog, generating sample data"
                );
            }
        }
    } else {
        info!(path = %path.display(), "Catalog file not found, generating sample data");
    }

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let songs = generate_catalog(&mut rng, settings.size);

    if !existed {
        match write_csv(path, &songs) {
            Ok(()) => info!(path = %path.display(), songs = songs.len(), "Sample catalog created"),
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "Failed to persist sample catalog, serving it from memory"
            ),
        }
    }

    Catalog::new(songs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "song_id,title,artist,genre,year,duration,popularity,danceability,energy,valence\n";

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn settings(path: PathBuf) -> CatalogSettings {
        CatalogSettings {
            path,
            size: 12,
            seed: Some(5),
        }
    }

    #[test]
    fn test_read_valid_csv() {
        let dir = tempfile::tempdir().unwrap();
        let contents = format!(
            "{HEADER}0,Song 1,Artist A,Rock,2005,180,40,0.5,0.6,0.7\n\
             1,Song 2,Artist B,Pop,2019,240,90,0.1,0.2,0.3\n"
        );
        let path = write_file(dir.path(), "data.csv", &contents);

        let report = read_csv(&path).unwrap();
        assert!(report.problems.is_empty());
        assert_eq!(report.songs.len(), 2);
        assert_eq!(report.songs[1].genre, "Pop");
        assert_eq!(report.songs[1].duration_seconds, 240);
    }

    #[test]
    fn test_read_skips_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let contents = format!(
            "{HEADER}0,Song 1,Artist A,Rock,2005,180,40,0.5,0.6,0.7\n\
             1,Song 2,Artist B,Pop,2019,240,,0.1,0.2,0.3\n\
             2,Song 3,Artist B,Pop,2019,240,101,0.1,0.2,0.3\n\
             0,Song 4,Artist C,Jazz,2001,200,50,0.1,0.2,0.3\n\
             4,Song 5,Artist C,Jazz,2001,200,50,0.1,0.2,0.3\n"
        );
        let path = write_file(dir.path(), "data.csv", &contents);

        let report = read_csv(&path).unwrap();
        let ids: Vec<SongId> = report.songs.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 4]);

        assert_eq!(report.problems.len(), 3);
        assert!(matches!(
            report.problems[0],
            LoadProblem::Malformed { line: 3, .. }
        ));
        assert!(matches!(
            report.problems[1],
            LoadProblem::Invalid {
                line: 4,
                id: 2,
                problem: SongProblem::PopularityOutOfRange(101)
            }
        ));
        assert_eq!(report.problems[2], LoadProblem::DuplicateId { line: 5, id: 0 });
    }

    #[test]
    fn test_read_fails_without_valid_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "data.csv", HEADER);
        assert!(matches!(read_csv(&path), Err(CatalogError::NoValidSongs(_))));
    }

    #[test]
    fn test_missing_file_generates_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");

        let catalog = load_or_generate(&settings(path.clone())).unwrap();
        assert_eq!(catalog.len(), 12);
        assert!(path.exists());

        // A second load reads back the persisted catalog
        let reloaded = load_or_generate(&settings(path)).unwrap();
        assert_eq!(reloaded.songs(), catalog.songs());
    }

    #[test]
    fn test_broken_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "data.csv", "not,a,catalog\n1,2,3\n");

        let catalog = load_or_generate(&settings(path.clone())).unwrap();
        assert_eq!(catalog.len(), 12);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "not,a,catalog\n1,2,3\n"
        );
    }

    #[test]
    fn test_existing_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let contents = format!("{HEADER}9,Only Song,Artist A,Rock,2005,180,40,0.5,0.6,0.7\n");
        let path = write_file(dir.path(), "data.csv", &contents);

        let catalog = load_or_generate(&settings(path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(9).unwrap().title, "Only Song");
    }
}
