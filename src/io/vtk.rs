//! Legacy-VTK snapshot output.
//!
//! Writes one structured-grid `.vtk` file per snapshot for visualization in
//! ParaView. Cell centers of the polar grid become VTK points at
//! `(r cos(phi), r sin(phi), 0)`; each conserved component becomes a scalar
//! point array `u0 .. u{N-1}`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::grid::PolarGrid;
use crate::io::{SnapshotError, SnapshotSink};
use crate::state::Field;

/// File-backed snapshot sink writing a series of legacy-VTK files.
///
/// Files are named `{stem}_{label}.vtk` under the output directory and are
/// flushed as they are written; `finish` additionally writes a `{stem}.series`
/// manifest mapping labels to files and times, then refuses further writes.
pub struct VtkSeriesSink {
    dir: PathBuf,
    stem: String,
    grid: PolarGrid,
    written: Vec<(String, f64, String)>,
    closed: bool,
}

impl VtkSeriesSink {
    /// Create a sink writing under `dir` with file stem `stem`.
    ///
    /// The directory is created if missing. The grid supplies point
    /// coordinates and pins the expected field shape.
    pub fn create(
        dir: impl AsRef<Path>,
        stem: impl Into<String>,
        grid: PolarGrid,
    ) -> Result<Self, SnapshotError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            stem: stem.into(),
            grid,
            written: Vec::new(),
            closed: false,
        })
    }

    /// Paths of the files written so far, relative to the output directory.
    pub fn files(&self) -> Vec<&str> {
        self.written.iter().map(|(_, _, f)| f.as_str()).collect()
    }

    fn write_file<const N: usize>(
        &self,
        path: &Path,
        time: f64,
        field: &Field<N>,
    ) -> Result<(), SnapshotError> {
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);

        let (nr, nphi) = field.shape();
        let n_points = nr * nphi;

        writeln!(w, "# vtk DataFile Version 3.0")?;
        writeln!(w, "{} t={:.12e}", self.stem, time)?;
        writeln!(w, "ASCII")?;
        writeln!(w, "DATASET STRUCTURED_GRID")?;
        // j (azimuth) varies fastest, matching the point order below
        writeln!(w, "DIMENSIONS {} {} 1", nphi, nr)?;
        writeln!(w, "POINTS {} double", n_points)?;
        for i in 0..nr {
            let r = self.grid.radius(i);
            for j in 0..nphi {
                let phi = self.grid.azimuth(j);
                writeln!(w, "{:.12e} {:.12e} 0.0", r * phi.cos(), r * phi.sin())?;
            }
        }

        writeln!(w, "POINT_DATA {}", n_points)?;
        for k in 0..N {
            writeln!(w, "SCALARS u{} double 1", k)?;
            writeln!(w, "LOOKUP_TABLE default")?;
            for i in 0..nr {
                for j in 0..nphi {
                    writeln!(w, "{:.12e}", field.get(i, j)[k])?;
                }
            }
        }

        w.flush()?;
        Ok(())
    }

    fn write_manifest(&self) -> Result<(), SnapshotError> {
        let path = self.dir.join(format!("{}.series", self.stem));
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);
        for (label, time, filename) in &self.written {
            writeln!(w, "{} {:.12e} {}", label, time, filename)?;
        }
        w.flush()?;
        Ok(())
    }
}

impl<const N: usize> SnapshotSink<N> for VtkSeriesSink {
    fn write(&mut self, label: &str, time: f64, field: &Field<N>) -> Result<(), SnapshotError> {
        if self.closed {
            return Err(SnapshotError::Closed);
        }
        let (grid_nr, grid_nphi) = (self.grid.nr(), self.grid.nphi());
        if field.shape() != (grid_nr, grid_nphi) {
            return Err(SnapshotError::ShapeChanged {
                nr: field.nr(),
                nphi: field.nphi(),
                series_nr: grid_nr,
                series_nphi: grid_nphi,
            });
        }

        let filename = format!("{}_{}.vtk", self.stem, label);
        self.write_file(&self.dir.join(&filename), time, field)?;
        self.written.push((label.to_owned(), time, filename));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SnapshotError> {
        if !self.closed {
            self.write_manifest()?;
            self.closed = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Conserved;
    use tempfile::tempdir;

    fn test_grid() -> PolarGrid {
        PolarGrid::build(1.0, 2.0, 3, 4, true).unwrap()
    }

    #[test]
    fn test_write_creates_labeled_files() {
        let dir = tempdir().unwrap();
        let mut sink = VtkSeriesSink::create(dir.path(), "disc", test_grid()).unwrap();
        let field: Field<2> = Field::from_fn(3, 4, |i, j| Conserved::new([i as f64, j as f64]));

        SnapshotSink::write(&mut sink, "U0", 0.0, &field).unwrap();
        SnapshotSink::write(&mut sink, "U10", 0.25, &field).unwrap();

        assert!(dir.path().join("disc_U0.vtk").exists());
        assert!(dir.path().join("disc_U10.vtk").exists());
        assert_eq!(sink.files(), vec!["disc_U0.vtk", "disc_U10.vtk"]);

        let content = fs::read_to_string(dir.path().join("disc_U0.vtk")).unwrap();
        assert!(content.contains("DATASET STRUCTURED_GRID"));
        assert!(content.contains("DIMENSIONS 4 3 1"));
        assert!(content.contains("SCALARS u0 double 1"));
        assert!(content.contains("SCALARS u1 double 1"));
    }

    #[test]
    fn test_finish_writes_manifest_and_closes() {
        let dir = tempdir().unwrap();
        let mut sink = VtkSeriesSink::create(dir.path(), "disc", test_grid()).unwrap();
        let field: Field<1> = Field::zeros(3, 4);

        SnapshotSink::write(&mut sink, "U0", 0.0, &field).unwrap();
        SnapshotSink::<1>::finish(&mut sink).unwrap();

        let manifest = fs::read_to_string(dir.path().join("disc.series")).unwrap();
        assert!(manifest.starts_with("U0 "));
        assert!(manifest.contains("disc_U0.vtk"));

        let err = SnapshotSink::write(&mut sink, "U10", 0.1, &field).unwrap_err();
        assert!(matches!(err, SnapshotError::Closed));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let dir = tempdir().unwrap();
        let mut sink = VtkSeriesSink::create(dir.path(), "disc", test_grid()).unwrap();
        let wrong: Field<1> = Field::zeros(2, 4);

        let err = SnapshotSink::write(&mut sink, "U0", 0.0, &wrong).unwrap_err();
        assert!(matches!(err, SnapshotError::ShapeChanged { .. }));
    }
}
