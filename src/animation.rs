//! Frame-by-frame animations of a [`Plotter`].

use std::path::Path;
use log::debug;
use pyo3::{prelude::*, types::PyDict};

use crate::{
    error::{Error, Result},
    plotter::Plotter,
    ANIMATION,
};

/// Indices of `frames` steps evenly spread over `0 .. n`, the first and
/// last steps included.
///
/// # Example
///
/// ```
/// use nested_grid_plotter::select_frame_indices;
/// assert_eq!(select_frame_indices(10, 4)?, [0, 3, 6, 9]);
/// # Ok::<(), nested_grid_plotter::Error>(())
/// ```
pub fn select_frame_indices(n: usize, frames: usize) -> Result<Vec<usize>> {
    if n == 0 || frames == 0 || frames > n || (frames == 1 && n > 1) {
        return Err(Error::InvalidFrameCount { len: n, frames })
    }
    if frames == 1 {
        return Ok(vec![0])
    }
    let last = (n - 1) as f64;
    let den = (frames - 1) as f64;
    Ok((0 .. frames)
       .map(|i| (i as f64 * last / den).round() as usize)
       .collect())
}

/// GIF writer: each frame is drawn by a user function, then grabbed.
#[derive(Debug, Clone)]
pub struct Animation {
    fps: f64,
    dpi: Option<f64>,
    frames: usize,
}

impl Default for Animation {
    fn default() -> Self {
        Animation { fps: 5., dpi: None, frames: 10 }
    }
}

impl Animation {
    pub fn new(frames: usize) -> Self {
        Animation { frames, ..Default::default() }
    }

    /// Frames per second of the output.
    pub fn fps(&mut self, fps: f64) -> &mut Self {
        if fps > 0. { self.fps = fps }
        self
    }

    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        if dpi > 0. {
            self.dpi = Some(dpi);
        } else {
            self.dpi = None;
        }
        self
    }

    /// Number of frames taken out of the available steps.
    pub fn frames(&mut self, frames: usize) -> &mut Self {
        self.frames = frames;
        self
    }

    /// Write a GIF to `path` out of `n` available steps.  For each
    /// selected step the axes of `plotter` are cleared, `draw` is called
    /// with the step index and the figure is grabbed.  Return the
    /// selected indices.
    pub fn save_gif<F>(&self, plotter: &mut Plotter, path: impl AsRef<Path>,
                       n: usize, mut draw: F) -> Result<Vec<usize>>
    where F: FnMut(&mut Plotter, usize) -> Result<()> {
        let indices = select_frame_indices(n, self.frames)?;
        let animation = pymod!(ANIMATION)?;
        let writer = Python::with_gil(|py| -> PyResult<_> {
            let kw = PyDict::new_bound(py);
            kw.set_item("fps", self.fps)?;
            let writer = animation.bind(py).getattr("PillowWriter")?
                .call((), Some(&kw))?;
            let setup_kw = PyDict::new_bound(py);
            if let Some(dpi) = self.dpi {
                setup_kw.set_item("dpi", dpi)?;
            }
            writer.call_method(
                "setup",
                (plotter.figure().obj().clone_ref(py), path.as_ref()),
                Some(&setup_kw))?;
            Ok(writer.unbind())
        })?;
        debug!("writing {} frames out of {n} steps to {}",
               indices.len(), path.as_ref().display());
        let mut grab = || -> Result<()> {
            for &i in &indices {
                plotter.clear_all_axes()?;
                draw(plotter, i)?;
                Python::with_gil(|py| writer.call_method0(py, "grab_frame"))?;
            }
            Ok(())
        };
        let grabbed = grab();
        // The file is closed even when drawing a frame failed.
        Python::with_gil(|py| writer.call_method0(py, "finish"))?;
        grabbed.map(|()| indices)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn evenly_spread() -> Result<()> {
        assert_eq!(select_frame_indices(10, 4)?, [0, 3, 6, 9]);
        assert_eq!(select_frame_indices(5, 5)?, [0, 1, 2, 3, 4]);
        assert_eq!(select_frame_indices(1, 1)?, [0]);
        assert_eq!(select_frame_indices(11, 2)?, [0, 10]);
        assert_eq!(select_frame_indices(5, 3)?, [0, 2, 4]);
        Ok(())
    }

    #[test]
    fn invalid_counts() {
        for (n, f) in [(3, 4), (0, 0), (0, 1), (5, 0), (5, 1)] {
            assert!(matches!(
                select_frame_indices(n, f),
                Err(Error::InvalidFrameCount { len, frames })
                    if len == n && frames == f), "n = {n}, f = {f}");
        }
    }

    #[test]
    fn settings() {
        let mut a = Animation::new(4);
        a.fps(0.).dpi(-1.);
        assert_eq!(a.fps, 5.);
        assert_eq!(a.dpi, None);
        a.fps(12.).dpi(80.).frames(7);
        assert_eq!((a.fps, a.dpi, a.frames), (12., Some(80.), 7));
    }

    proptest! {
        #[test]
        fn selection_properties(n in 2usize .. 500, f in 2usize .. 500) {
            prop_assume!(f <= n);
            let idx = select_frame_indices(n, f).unwrap();
            prop_assert_eq!(idx.len(), f);
            prop_assert_eq!(idx[0], 0);
            prop_assert_eq!(idx[f - 1], n - 1);
            prop_assert!(idx.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
