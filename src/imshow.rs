//! Several 2-D fields on several axes with one shared colorbar.

use log::debug;
use ndarray::ArrayView2;
use numpy::{PyArray1, ToPyArray};
use pyo3::{prelude::*, types::{PyDict, PyList}};

use crate::{
    error::{Error, Result},
    mpl::{Axes, Colorbar, SubFigure},
    COLORS,
};

/// Normalization of the colour scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScale {
    #[default]
    Linear,
    /// Linear, centered on zero: `[-m, m]` with `m` the largest absolute
    /// bound.
    Symmetric,
    Log,
}

/// Options of [`multi_imshow`].
#[derive(Debug, Clone)]
pub struct ImshowOptions {
    cmap: String,
    interpolation: String,
    scale: ColorScale,
    vmin: Option<f64>,
    vmax: Option<f64>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    cbar_title: Option<String>,
    cbar_horizontal: bool,
}

impl Default for ImshowOptions {
    fn default() -> Self {
        ImshowOptions {
            cmap: "bwr".into(),
            interpolation: "nearest".into(),
            scale: ColorScale::Linear,
            vmin: None,
            vmax: None,
            xlabel: None,
            ylabel: None,
            cbar_title: None,
            cbar_horizontal: false,
        }
    }
}

impl ImshowOptions {
    #[must_use]
    pub fn cmap(mut self, cmap: impl Into<String>) -> Self {
        self.cmap = cmap.into();
        self
    }

    #[must_use]
    pub fn interpolation(mut self, i: impl Into<String>) -> Self {
        self.interpolation = i.into();
        self
    }

    #[must_use]
    pub fn scale(mut self, scale: ColorScale) -> Self {
        self.scale = scale;
        self
    }

    /// Fix the lower bound of the colour scale instead of taking the
    /// smallest value of the data.
    #[must_use]
    pub fn vmin(mut self, v: f64) -> Self {
        self.vmin = Some(v);
        self
    }

    #[must_use]
    pub fn vmax(mut self, v: f64) -> Self {
        self.vmax = Some(v);
        self
    }

    /// Label of every x-axis.
    #[must_use]
    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    #[must_use]
    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    #[must_use]
    pub fn cbar_title(mut self, title: impl Into<String>) -> Self {
        self.cbar_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn cbar_horizontal(mut self, yes: bool) -> Self {
        self.cbar_horizontal = yes;
        self
    }
}

/// Bounds of the colour scale shared by `data`.  NaN values are
/// ignored; `vmin` and `vmax` override the bounds found in the data.
pub fn color_range<'a>(data: impl IntoIterator<Item = ArrayView2<'a, f64>>,
                       scale: ColorScale,
                       vmin: Option<f64>, vmax: Option<f64>)
                       -> Result<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for a in data {
        for &v in a.iter().filter(|v| !v.is_nan()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    let mut lo = vmin.unwrap_or(lo);
    let mut hi = vmax.unwrap_or(hi);
    if !lo.is_finite() || !hi.is_finite() {
        return Err(Error::InvalidValues(
            "no finite value to scale the colors with".into()))
    }
    if lo > hi {
        return Err(Error::InvalidValues(format!(
            "empty color range [{lo}, {hi}]")))
    }
    match scale {
        ColorScale::Linear => (),
        ColorScale::Symmetric => {
            let m = lo.abs().max(hi.abs());
            lo = -m;
            hi = m;
        }
        ColorScale::Log => if lo <= 0. {
            return Err(Error::InvalidValues(format!(
                "a logarithmic color scale needs positive bounds, got {lo}")))
        }
    }
    Ok((lo, hi))
}

/// Show each field of `data` on the matching axes of `axes`, with a
/// single colour scale and one colorbar attached to `fig`.  The first
/// dimension of each array runs along x.  Each axes is titled with the
/// name of its field.
pub fn multi_imshow(axes: &[Axes], fig: &SubFigure,
                    data: &[(&str, ArrayView2<'_, f64>)],
                    opts: &ImshowOptions) -> Result<Colorbar> {
    if axes.len() != data.len() || axes.is_empty() {
        return Err(Error::Mismatch(format!(
            "{} axes for {} data arrays", axes.len(), data.len())))
    }
    let (vmin, vmax) = color_range(data.iter().map(|(_, a)| a.view()),
                                   opts.scale, opts.vmin, opts.vmax)?;
    debug!("imshow of {} fields, colors in [{vmin}, {vmax}]", data.len());
    let colors = pymod!(COLORS)?;
    let cbar = Python::with_gil(|py| -> PyResult<_> {
        let norm_kw = PyDict::new_bound(py);
        norm_kw.set_item("vmin", vmin)?;
        norm_kw.set_item("vmax", vmax)?;
        let norm_class = match opts.scale {
            ColorScale::Log => "LogNorm",
            ColorScale::Linear | ColorScale::Symmetric => "Normalize",
        };
        let norm = colors.bind(py).getattr(norm_class)?
            .call((), Some(&norm_kw))?;
        let mut first_image = None;
        for (ax, (label, values)) in axes.iter().zip(data) {
            let ax = ax.obj().bind(py);
            let kw = PyDict::new_bound(py);
            kw.set_item("interpolation", opts.interpolation.as_str())?;
            kw.set_item("cmap", opts.cmap.as_str())?;
            kw.set_item("aspect", "auto")?;
            kw.set_item("origin", "lower")?;
            kw.set_item("norm", &norm)?;
            let image = ax.call_method(
                "imshow", (values.t().to_pyarray_bound(py),), Some(&kw))?;
            first_image.get_or_insert(image);
            ax.call_method0("label_outer")?;
            let bold = PyDict::new_bound(py);
            bold.set_item("fontweight", "bold")?;
            let title = bold.copy()?;
            title.set_item("style", "italic")?;
            ax.call_method("set_title", (*label,), Some(&title))?;
            if let Some(l) = &opts.xlabel {
                ax.call_method("set_xlabel", (l.as_str(),), Some(&bold))?;
            }
            if let Some(l) = &opts.ylabel {
                ax.call_method("set_ylabel", (l.as_str(),), Some(&bold))?;
            }
        }
        let cbar_kw = PyDict::new_bound(py);
        cbar_kw.set_item("orientation",
                         if opts.cbar_horizontal { "horizontal" }
                         else { "vertical" })?;
        cbar_kw.set_item("aspect", 20)?;
        cbar_kw.set_item("ax", PyList::new_bound(
            py, axes.iter().map(|a| a.obj().clone_ref(py))))?;
        let cbar = fig.obj().bind(py)
            .call_method("colorbar", (first_image,), Some(&cbar_kw))?;
        Ok(Colorbar::new(cbar.unbind()))
    })?;
    if let Some(t) = &opts.cbar_title {
        cbar.set_label(t)?;
    }
    Ok(cbar)
}

/// Positions of the lines separating the cells of an `nx × ny` image
/// drawn with integer pixel centers.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    /// Abscissas of the vertical lines.
    pub x: Vec<f64>,
    /// Ordinates of the horizontal lines.
    pub y: Vec<f64>,
    /// Extent of the vertical lines along y.
    pub yspan: (f64, f64),
    /// Extent of the horizontal lines along x.
    pub xspan: (f64, f64),
}

pub fn grid_lines(nx: usize, ny: usize) -> GridLines {
    GridLines {
        x: (0 .. nx).map(|i| i as f64 + 0.5).collect(),
        y: (0 .. ny).map(|j| j as f64 + 0.5).collect(),
        yspan: (-0.5, ny as f64 - 0.5),
        xspan: (-0.5, nx as f64 - 0.5),
    }
}

/// Draw thin grey lines between the cells of an `nx × ny` image.
pub fn add_2d_grid(ax: &Axes, nx: usize, ny: usize) -> Result<()> {
    let g = grid_lines(nx, ny);
    Ok(Python::with_gil(|py| -> PyResult<_> {
        let ax = ax.obj().bind(py);
        let kw = PyDict::new_bound(py);
        kw.set_item("color", "grey")?;
        kw.set_item("linewidths", 0.5)?;
        ax.call_method("vlines", (PyArray1::from_slice_bound(py, &g.x),
                                  g.yspan.0, g.yspan.1), Some(&kw))?;
        ax.call_method("hlines", (PyArray1::from_slice_bound(py, &g.y),
                                  g.xspan.0, g.xspan.1), Some(&kw))?;
        Ok(())
    })?)
}
