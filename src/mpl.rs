//! Thin bindings to the Matplotlib objects the plotter drives.
//!
//! Handles (`Figure`, `SubFigure`, `Axes`,...) are reference counted
//! Python objects: cloning a handle does not copy the underlying object,
//! and methods taking `&mut self` mutate it for every clone.

use std::path::Path;
use indexmap::IndexMap;
use numpy::PyArray1;
use pyo3::{
    prelude::*,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::{PyDict, PyList},
};

use crate::{
    align::{Dim, Surface},
    error::{Error, Result},
    layout::{Container, Group, Mosaic},
    legend::{BBox, Measurer, Scene, Side, Spot},
    FIGURE, PYPLOT,
};

/// The top level container for all the plot elements.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

/// A figure or a subfigure, i.e., something able to hold axes,
/// subfigures and legends.
#[derive(Debug, Clone)]
pub struct SubFigure {
    fig: PyObject,
}

#[derive(Debug, Clone)]
pub struct Axes {
    ax: PyObject,
}

#[derive(Debug, Clone)]
pub struct Legend {
    lgd: PyObject,
}

/// Any artist usable as a legend handle (lines, patches, collections...).
#[derive(Debug, Clone)]
pub struct Artist {
    obj: PyObject,
}

#[derive(Debug, Clone)]
pub struct Colorbar {
    cbar: PyObject,
}

/// Read a `matplotlib.transforms.Bbox`.
fn bbox(b: &Bound<'_, PyAny>) -> PyResult<BBox> {
    Ok(BBox::new(b.getattr("x0")?.extract()?, b.getattr("y0")?.extract()?,
                 b.getattr("x1")?.extract()?, b.getattr("y1")?.extract()?))
}

/// Layout engine of a [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEngine { Constrained, Tight, Compressed }

/// Options of [`Figure::with_options`].
#[derive(Debug, Clone, Default)]
pub struct FigureOptions {
    figsize: Option<(f64, f64)>,
    dpi: Option<f64>,
    layout: Option<LayoutEngine>,
}

impl FigureOptions {
    /// Width and height in inches.
    #[must_use]
    pub fn figsize(mut self, width: f64, height: f64) -> Self {
        self.figsize = Some((width, height));
        self
    }

    #[must_use]
    pub fn dpi(mut self, dpi: f64) -> Self {
        if dpi > 0. { self.dpi = Some(dpi) } else { self.dpi = None }
        self
    }

    #[must_use]
    pub fn layout(mut self, engine: LayoutEngine) -> Self {
        self.layout = Some(engine);
        self
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if let Some(size) = self.figsize {
            kwargs.set_item("figsize", size)?;
        }
        if let Some(dpi) = self.dpi {
            kwargs.set_item("dpi", dpi)?;
        }
        if let Some(engine) = self.layout {
            kwargs.set_item("layout", match engine {
                LayoutEngine::Constrained => "constrained",
                LayoutEngine::Tight => "tight",
                LayoutEngine::Compressed => "compressed",
            })?;
        }
        Ok(kwargs)
    }
}

impl Figure {
    /// Return a new `Figure`.
    ///
    /// Return an error if Matplotlib is not present on the system.
    pub fn new() -> Result<Figure> {
        Figure::with_options(&FigureOptions::default())
    }

    pub fn with_options(opts: &FigureOptions) -> Result<Figure> {
        let figure = pymod!(FIGURE)?;
        let fig = Python::with_gil(|py| -> PyResult<_> {
            let kwargs = opts.kwargs(py)?;
            Ok(figure.bind(py).getattr("Figure")?
               .call((), Some(&kwargs))?.unbind())
        })?;
        Ok(Figure { fig })
    }

    /// The figure seen as a container of axes and subfigures.
    pub fn as_subfigure(&self) -> SubFigure {
        SubFigure { fig: self.fig.clone() }
    }

    /// Whether a layout engine (constrained, tight,...) positions the
    /// axes of this figure.
    pub fn has_layout_engine(&self) -> Result<bool> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            Ok(!self.fig.call_method0(py, "get_layout_engine")?.is_none(py))
        })?)
    }

    pub fn suptitle(&self, title: &str) -> Result<()> {
        Ok(meth!(self.fig, suptitle, (title,))?)
    }

    /// If using a GUI backend with pyplot, display the figure window.
    ///
    /// ⚠ [This does not manage an GUI event loop][GUI]. Consequently,
    /// the figure may only be shown briefly or not shown at all if
    /// you or your environment are not managing an event loop.  Use
    /// [`show()`] for that.
    ///
    /// [GUI]: https://matplotlib.org/stable/api/figure_api.html#matplotlib.figure.Figure.show
    pub fn show(self) -> Result<()> {
        Ok(Python::with_gil(|py| self.fig.call_method0(py, "show").map(|_| ()))?)
    }

    /// Release the figure from pyplot's figure manager (no-op for a
    /// figure not created through pyplot).
    pub fn close(&self) -> Result<()> {
        let pyplot = pymod!(PYPLOT)?;
        Ok(meth!(pyplot, close, py -> (self.fig.clone_ref(py),))?)
    }

    pub fn save(&self) -> Savefig {
        Savefig { fig: self.fig.clone(), dpi: None, tight: false,
                  transparent: false, extra_artists: vec![] }
    }

    pub(crate) fn obj(&self) -> &PyObject { &self.fig }
}

/// Builder for [`Figure::save`].
pub struct Savefig {
    fig: PyObject,
    dpi: Option<f64>,
    tight: bool,
    transparent: bool,
    extra_artists: Vec<PyObject>,
}

impl Savefig {
    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        if dpi > 0. {
            self.dpi = Some(dpi);
        } else {
            self.dpi = None;
        }
        self
    }

    /// Crop the image to the drawn artists (`bbox_inches="tight"`).
    pub fn tight(&mut self, tight: bool) -> &mut Self {
        self.tight = tight;
        self
    }

    pub fn transparent(&mut self, transparent: bool) -> &mut Self {
        self.transparent = transparent;
        self
    }

    /// Artists that must be inside the tight bounding box.
    pub(crate) fn extra_artists(&mut self, artists: Vec<PyObject>) -> &mut Self {
        self.extra_artists = artists;
        self
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        Python::with_gil(|py| {
            let save = || -> PyResult<()> {
                let kwargs = PyDict::new_bound(py);
                if let Some(dpi) = self.dpi {
                    kwargs.set_item("dpi", dpi)?;
                }
                if self.tight {
                    kwargs.set_item("bbox_inches", "tight")?;
                }
                if self.transparent {
                    kwargs.set_item("transparent", true)?;
                }
                if !self.extra_artists.is_empty() {
                    let extra = PyList::new_bound(
                        py, self.extra_artists.iter().map(|a| a.clone_ref(py)));
                    kwargs.set_item("bbox_extra_artists", extra)?;
                }
                self.fig.call_method_bound(py, "savefig", (path.as_ref(),),
                                           Some(&kwargs))?;
                Ok(())
            };
            save().map_err(|e| {
                if e.is_instance_of::<PyFileNotFoundError>(py) {
                    Error::FileNotFound
                } else if e.is_instance_of::<PyPermissionError>(py) {
                    Error::PermissionDenied
                } else {
                    Error::Python(e)
                }
            })
        })
    }
}

/// Return a new figure managed by pyplot.
pub fn figure() -> Result<Figure> {
    let pyplot = pymod!(PYPLOT)?;
    let fig = Python::with_gil(|py| pyplot.getattr(py, "figure")?.call0(py))?;
    Ok(Figure { fig })
}

/// Display all open figures.
pub fn show() -> Result<()> {
    let pyplot = pymod!(PYPLOT)?;
    Ok(Python::with_gil(|py| pyplot.getattr(py, "show")?.call0(py).map(|_| ()))?)
}

impl SubFigure {
    /// Create a legend attached to this (sub)figure.
    pub(crate) fn legend(&self, items: &[(Artist, String)],
                         kwargs: impl FnOnce(&Bound<'_, PyDict>) -> PyResult<()>)
                         -> Result<Legend> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let (handles, labels) = split_items(py, items);
            let kw = PyDict::new_bound(py);
            kwargs(&kw)?;
            let lgd = self.fig.call_method_bound(py, "legend",
                                                 (handles, labels), Some(&kw))?;
            Ok(Legend { lgd })
        })?)
    }

    /// Remove every legend attached to this (sub)figure.
    pub fn clear_legends(&self) -> Result<()> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            self.fig.getattr(py, "legends")?.call_method0(py, "clear")?;
            Ok(())
        })?)
    }

    pub fn suptitle(&self, title: &str) -> Result<()> {
        Ok(meth!(self.fig, suptitle, (title,))?)
    }

    pub fn supxlabel(&self, label: &str) -> Result<()> {
        Ok(meth!(self.fig, supxlabel, (label,))?)
    }

    pub fn supylabel(&self, label: &str) -> Result<()> {
        Ok(meth!(self.fig, supylabel, (label,))?)
    }

    /// Legends and sup-titles/labels of this (sub)figure, i.e., the
    /// artists that may lie outside of every axes.
    pub(crate) fn floating_artists(&self) -> Result<Vec<PyObject>> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let fig = self.fig.bind(py);
            let mut artists = vec![];
            for lgd in fig.getattr("legends")?.iter()? {
                artists.push(lgd?.unbind());
            }
            for attr in ["_suptitle", "_supxlabel", "_supylabel"] {
                if let Ok(text) = fig.getattr(attr) {
                    if !text.is_none() { artists.push(text.unbind()) }
                }
            }
            Ok(artists)
        })?)
    }

    pub(crate) fn obj(&self) -> &PyObject { &self.fig }
}

/// Split legend items into Python lists of handles and labels.
fn split_items<'py>(py: Python<'py>, items: &[(Artist, String)])
                    -> (Bound<'py, PyList>, Bound<'py, PyList>) {
    (PyList::new_bound(py, items.iter().map(|(a, _)| a.obj.clone_ref(py))),
     PyList::new_bound(py, items.iter().map(|(_, l)| l.as_str())))
}

impl Container for SubFigure {
    type Surface = Axes;

    fn subfigures(&self, group: &Group) -> Result<Vec<Self>> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("squeeze", false)?;
            kwargs.set_item("wspace", group.get_wspace())?;
            kwargs.set_item("hspace", group.get_hspace())?;
            kwargs.set_item("width_ratios", group.get_width_ratios())?;
            kwargs.set_item("height_ratios", group.get_height_ratios())?;
            // Shape (nrows, ncols) array of subfigures, read row-major.
            let sfs = self.fig.bind(py).call_method(
                "subfigures", (group.nrows(), group.ncols()), Some(&kwargs))?;
            let mut subfigures = vec![];
            for sf in sfs.call_method0("flatten")?.iter()? {
                subfigures.push(SubFigure { fig: sf?.unbind() });
            }
            Ok(subfigures)
        })?)
    }

    fn subplot_mosaic(&self, mosaic: &Mosaic)
                      -> Result<IndexMap<String, Axes>> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let cells = PyList::new_bound(py, mosaic.cells().iter().map(|row| {
                PyList::new_bound(py, row.iter().map(String::as_str))
            }));
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("sharex", mosaic.is_sharex())?;
            kwargs.set_item("sharey", mosaic.is_sharey())?;
            kwargs.set_item("width_ratios", mosaic.get_width_ratios())?;
            kwargs.set_item("height_ratios", mosaic.get_height_ratios())?;
            kwargs.set_item("empty_sentinel", mosaic.get_empty_sentinel())?;
            let created = self.fig.bind(py).call_method(
                "subplot_mosaic", (cells,), Some(&kwargs))?;
            let created = created.downcast::<PyDict>()?;
            let mut axes = IndexMap::new();
            for (label, ax) in created.iter() {
                axes.insert(label.extract::<String>()?, Axes { ax: ax.unbind() });
            }
            Ok(axes)
        })?)
    }
}

/// Direction of the tick marks, see [`GridOptions::tick_direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDirection { In, Out, InOut }

impl TickDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TickDirection::In => "in",
            TickDirection::Out => "out",
            TickDirection::InOut => "inout",
        }
    }
}

/// Options of [`Axes::set_grid`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    visible: bool,
    tick_direction: Option<TickDirection>,
    labelsize: Option<f64>,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions { visible: true, tick_direction: None, labelsize: None }
    }
}

impl GridOptions {
    #[must_use]
    pub fn visible(mut self, yes: bool) -> Self {
        self.visible = yes;
        self
    }

    #[must_use]
    pub fn tick_direction(mut self, d: TickDirection) -> Self {
        self.tick_direction = Some(d);
        self
    }

    /// Font size (points) of the tick labels.  Non-positive sizes leave
    /// the labels as they are.
    #[must_use]
    pub fn labelsize(mut self, size: f64) -> Self {
        self.labelsize = if size > 0. { Some(size) } else { None };
        self
    }

    /// Arguments of `tick_params`, `None` when the ticks are unchanged.
    fn tick_kwargs<'py>(&self, py: Python<'py>)
                        -> PyResult<Option<Bound<'py, PyDict>>> {
        if self.tick_direction.is_none() && self.labelsize.is_none() {
            return Ok(None)
        }
        let kwargs = PyDict::new_bound(py);
        kwargs.set_item("which", "both")?;
        if let Some(d) = self.tick_direction {
            kwargs.set_item("direction", d.as_str())?;
        }
        if let Some(size) = self.labelsize {
            kwargs.set_item("labelsize", size)?;
        }
        Ok(Some(kwargs))
    }
}

impl Axes {
    /// Plot `y` versus `x` as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nested_grid_plotter::Plotter;
    /// let plotter = Plotter::new_default()?;
    /// let mut ax = plotter.get_axis("ax1-1")?;
    /// ax.plot(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).fmt("r.").draw()?;
    /// # Ok::<(), nested_grid_plotter::Error>(())
    /// ```
    #[must_use]
    pub fn plot<'a>(&'a mut self, x: &'a [f64], y: &'a [f64]) -> Plot<'a> {
        Plot { axes: self, x: Some(x), y,
               fmt: "", label: None, linewidth: None, alpha: None }
    }

    /// Plot `y` versus its indices as lines and/or markers.
    #[must_use]
    pub fn plot_y<'a>(&'a mut self, y: &'a [f64]) -> Plot<'a> {
        Plot { axes: self, x: None, y,
               fmt: "", label: None, linewidth: None, alpha: None }
    }

    /// Scatter plot of `y` versus `x`; return the created collection.
    pub fn scatter(&mut self, x: &[f64], y: &[f64], label: Option<&str>)
                   -> Result<Artist> {
        if x.len() != y.len() {
            return Err(Error::Mismatch(format!(
                "scatter: {} abscissas for {} ordinates", x.len(), y.len())))
        }
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let kwargs = PyDict::new_bound(py);
            if let Some(l) = label { kwargs.set_item("label", l)? }
            let obj = self.ax.call_method_bound(
                py, "scatter",
                (PyArray1::from_slice_bound(py, x),
                 PyArray1::from_slice_bound(py, y)),
                Some(&kwargs))?;
            Ok(Artist { obj })
        })?)
    }

    pub fn set_title(&mut self, v: &str) -> Result<&mut Self> {
        meth!(self.ax, set_title, (v,))?;
        Ok(self)
    }

    /// Set the yaxis' scale.  Possible values for `v` are "linear",
    /// "log", "symlog", "logit",...
    pub fn set_yscale(&mut self, v: &str) -> Result<&mut Self> {
        meth!(self.ax, set_yscale, (v,))?;
        Ok(self)
    }

    pub fn grid(&mut self, visible: bool) -> Result<&mut Self> {
        meth!(self.ax, grid, (visible,))?;
        Ok(self)
    }

    /// Show or hide the grid and restyle the ticks as `opts` says.
    pub fn set_grid(&mut self, opts: &GridOptions) -> Result<&mut Self> {
        Python::with_gil(|py| -> PyResult<_> {
            let ax = self.ax.bind(py);
            ax.call_method1("grid", (opts.visible,))?;
            if let Some(kwargs) = opts.tick_kwargs(py)? {
                ax.call_method("tick_params", (), Some(&kwargs))?;
            }
            Ok(())
        })?;
        Ok(self)
    }

    pub fn set_xlabel(&mut self, label: &str) -> Result<&mut Self> {
        meth!(self.ax, set_xlabel, (label,))?;
        Ok(self)
    }

    pub fn set_ylabel(&mut self, label: &str) -> Result<&mut Self> {
        meth!(self.ax, set_ylabel, (label,))?;
        Ok(self)
    }

    /// Only show the tick labels and axis labels on the outer edges of
    /// the grid.
    pub fn label_outer(&mut self) -> Result<&mut Self> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            self.ax.call_method0(py, "label_outer")?;
            Ok(())
        }).map(|_| self)?)
    }

    /// Write `text` in large grey letters at the center of the axes.
    pub fn identify(&mut self, text: &str, fontsize: f64) -> Result<()> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("transform", self.ax.getattr(py, "transAxes")?)?;
            kwargs.set_item("ha", "center")?;
            kwargs.set_item("va", "center")?;
            kwargs.set_item("fontsize", fontsize)?;
            kwargs.set_item("color", "darkgrey")?;
            self.ax.call_method_bound(py, "text", (0.5, 0.5, text),
                                      Some(&kwargs))?;
            Ok(())
        })?)
    }

    /// Remove all data, legends and decorations.
    pub fn clear(&mut self) -> Result<()> {
        Ok(Python::with_gil(|py| self.ax.call_method0(py, "clear").map(|_| ()))?)
    }

    /// New axes sharing the x-axis, with an independent y-axis on the
    /// right.
    pub fn twinx(&mut self) -> Result<Axes> {
        let ax = Python::with_gil(|py| self.ax.call_method0(py, "twinx"))?;
        Ok(Axes { ax })
    }

    /// Handles and labels to put in a legend of these axes, including
    /// those of twin axes (same position in the same figure).
    pub fn legend_items(&self) -> Result<Vec<(Artist, String)>> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let ax = self.ax.bind(py);
            let mut items = handles_labels(ax)?;
            let bounds: (f64, f64, f64, f64) =
                ax.getattr("bbox")?.getattr("bounds")?.extract()?;
            let figure = ax.getattr("figure")?;
            if !figure.is_none() {
                for other in figure.getattr("axes")?.iter()? {
                    let other = other?;
                    if other.is(ax) { continue }
                    let b: (f64, f64, f64, f64) =
                        other.getattr("bbox")?.getattr("bounds")?.extract()?;
                    if b == bounds {
                        items.extend(handles_labels(&other)?);
                    }
                }
            }
            Ok(items)
        })?)
    }

    /// Create a legend with `items` on these axes.
    pub(crate) fn legend(&self, items: &[(Artist, String)],
                         kwargs: impl FnOnce(&Bound<'_, PyDict>) -> PyResult<()>)
                         -> Result<Legend> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let (handles, labels) = split_items(py, items);
            let kw = PyDict::new_bound(py);
            kwargs(&kw)?;
            let lgd = self.ax.call_method_bound(py, "legend",
                                                (handles, labels), Some(&kw))?;
            Ok(Legend { lgd })
        })?)
    }

    /// The (sub)figure holding these axes.
    pub fn figure(&self) -> Result<SubFigure> {
        let fig = Python::with_gil(|py| self.ax.getattr(py, "figure"))?;
        Ok(SubFigure { fig })
    }

    pub(crate) fn obj(&self) -> &PyObject { &self.ax }
}

fn handles_labels(ax: &Bound<'_, PyAny>) -> PyResult<Vec<(Artist, String)>> {
    let (handles, labels): (Vec<PyObject>, Vec<String>) =
        ax.call_method0("get_legend_handles_labels")?.extract()?;
    Ok(handles.into_iter().map(|obj| Artist { obj }).zip(labels).collect())
}

/// Options of a line plot; see [`Axes::plot`].
#[must_use]
pub struct Plot<'a> {
    axes: &'a Axes,
    x: Option<&'a [f64]>,
    y: &'a [f64],
    fmt: &'a str,
    label: Option<&'a str>,
    linewidth: Option<f64>,
    alpha: Option<f64>,
}

impl<'a> Plot<'a> {
    /// Matplotlib format string, e.g. `"r."`.
    pub fn fmt(mut self, fmt: &'a str) -> Self {
        self.fmt = fmt;
        self
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn linewidth(mut self, w: f64) -> Self {
        self.linewidth = Some(w);
        self
    }

    pub fn alpha(mut self, a: f64) -> Self {
        self.alpha = Some(a);
        self
    }

    /// Draw the line(s) and return the created artists.
    pub fn draw(self) -> Result<Vec<Artist>> {
        if let Some(x) = self.x {
            if x.len() != self.y.len() {
                return Err(Error::Mismatch(format!(
                    "plot: {} abscissas for {} ordinates",
                    x.len(), self.y.len())))
            }
        }
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let kwargs = PyDict::new_bound(py);
            if let Some(l) = self.label { kwargs.set_item("label", l)? }
            if let Some(w) = self.linewidth { kwargs.set_item("linewidth", w)? }
            if let Some(a) = self.alpha { kwargs.set_item("alpha", a)? }
            let y = PyArray1::from_slice_bound(py, self.y);
            let lines = match self.x {
                Some(x) => self.axes.ax.call_method_bound(
                    py, "plot", (PyArray1::from_slice_bound(py, x), y, self.fmt),
                    Some(&kwargs))?,
                None => self.axes.ax.call_method_bound(
                    py, "plot", (y, self.fmt), Some(&kwargs))?,
            };
            let lines: Vec<PyObject> = lines.extract(py)?;
            Ok(lines.into_iter().map(|obj| Artist { obj }).collect())
        })?)
    }
}

impl Surface for Axes {
    fn ticks(&self, dim: Dim) -> Result<Vec<f64>> {
        let m = format!("get_{}ticks", dim.letter());
        Ok(Python::with_gil(|py| -> PyResult<_> {
            self.ax.bind(py).call_method0(m.as_str())?
                .call_method0("tolist")?.extract()
        })?)
    }

    fn set_ticks(&mut self, dim: Dim, ticks: &[f64]) -> Result<()> {
        let m = format!("set_{}ticks", dim.letter());
        Ok(Python::with_gil(|py| {
            self.ax.call_method1(py, m.as_str(), (ticks.to_vec(),)).map(|_| ())
        })?)
    }

    fn limits(&self, dim: Dim) -> Result<(f64, f64)> {
        let m = format!("get_{}lim", dim.letter());
        Ok(Python::with_gil(|py| {
            self.ax.call_method0(py, m.as_str())?.extract(py)
        })?)
    }

    fn set_limits(&mut self, dim: Dim, (lo, hi): (f64, f64)) -> Result<()> {
        let m = format!("set_{}lim", dim.letter());
        Ok(Python::with_gil(|py| {
            self.ax.call_method1(py, m.as_str(), (lo, hi)).map(|_| ())
        })?)
    }

    fn share(&mut self, dim: Dim, leader: &Self) -> Result<()> {
        let m = format!("share{}", dim.letter());
        Ok(Python::with_gil(|py| {
            self.ax.call_method1(py, m.as_str(), (leader.ax.clone_ref(py),))
                .map(|_| ())
        })?)
    }
}

impl Legend {
    /// Bounding box in display coordinates (renders the figure if
    /// needed).
    pub fn window_extent(&self) -> Result<BBox> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            bbox(&self.lgd.bind(py).call_method0("get_window_extent")?)
        })?)
    }
}

impl Artist {
    /// Copy of this artist attached to `target`, unless it already
    /// belongs to it.  An artist cannot be drawn in two figures.
    pub(crate) fn for_figure(&self, target: &SubFigure,
                             copy: &Py<PyModule>) -> Result<Artist> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let obj = self.obj.bind(py);
            let target = target.fig.bind(py);
            if obj.getattr("figure")?.is(target) {
                return Ok(self.clone())
            }
            let copied = copy.bind(py).call_method1("copy", (obj,))?;
            copied.setattr("figure", target)?;
            Ok(Artist { obj: copied.unbind() })
        })?)
    }
}

impl Colorbar {
    /// Label the colorbar along its long side.
    pub fn set_label(&self, label: &str) -> Result<()> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let ax = self.cbar.bind(py).getattr("ax")?;
            ax.getattr("yaxis")?.setattr("labelpad", 20)?;
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("rotation", 270)?;
            ax.call_method("set_ylabel", (label,), Some(&kwargs))?;
            Ok(())
        })?)
    }

    pub(crate) fn new(cbar: PyObject) -> Self { Colorbar { cbar } }
}

/// Where a legend is anchored and what it must not cover.
pub(crate) enum Frame {
    /// An axes legend.  Outside of the axes, the frame itself is an
    /// obstacle.
    Axes { ax: PyObject, outside: bool },
    /// A figure or subfigure legend, avoiding the listed axes and their
    /// decorations.
    Container(PyObject, Vec<PyObject>),
}

/// [`Measurer`] backed by Matplotlib: every measure is a render pass of
/// the whole figure.
pub(crate) struct LegendGeometry {
    figure: PyObject,
    legend: PyObject,
    frame: Frame,
}

impl LegendGeometry {
    pub(crate) fn new(figure: &Figure, legend: &Legend, frame: Frame) -> Self {
        LegendGeometry { figure: figure.fig.clone(),
                      legend: legend.lgd.clone(),
                      frame }
    }
}

/// Tick labels, axis labels and title of `ax`.
fn decorations(ax: &Bound<'_, PyAny>, out: &mut Vec<BBox>) -> PyResult<()> {
    for axis in ["xaxis", "yaxis"] {
        let b = ax.getattr(axis)?.call_method0("get_tightbbox")?;
        if !b.is_none() { out.push(bbox(&b)?) }
    }
    let title = ax.getattr("title")?;
    if !title.call_method0("get_text")?.extract::<String>()?.is_empty() {
        out.push(bbox(&title.call_method0("get_window_extent")?)?);
    }
    Ok(())
}

impl Measurer for LegendGeometry {
    fn measure(&mut self) -> Result<Scene> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let fig = self.figure.bind(py);
            fig.call_method0("draw_without_rendering")?;
            let legend = bbox(&self.legend.bind(py)
                              .call_method0("get_window_extent")?)?;
            let mut obstacles = vec![];
            let frame = match &self.frame {
                Frame::Axes { ax, outside } => {
                    let ax = ax.bind(py);
                    decorations(ax, &mut obstacles)?;
                    let frame = bbox(&ax.call_method0("get_window_extent")?)?;
                    if *outside { obstacles.push(frame) }
                    frame
                }
                Frame::Container(container, axes) => {
                    for ax in axes {
                        let ax = ax.bind(py);
                        decorations(ax, &mut obstacles)?;
                        obstacles.push(bbox(&ax.call_method0("get_window_extent")?)?);
                    }
                    bbox(&container.bind(py).getattr("bbox")?)?
                }
            };
            let canvas = bbox(&fig.getattr("bbox")?)?;
            Ok(Scene { legend, obstacles, frame, canvas })
        })?)
    }

    fn move_legend(&mut self, spot: Spot) -> Result<()> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let lgd = self.legend.bind(py);
            match spot {
                Spot::Point(x, y) => {
                    let transform = match &self.frame {
                        Frame::Axes { ax, .. } => ax.bind(py).getattr("transAxes")?,
                        Frame::Container(c, _) =>
                            c.bind(py).getattr("transSubfigure")?,
                    };
                    lgd.call_method1("set_bbox_to_anchor", ((x, y), transform))?;
                }
                Spot::Named(anchor) => {
                    lgd.call_method1("set_loc", (anchor.as_str(),))?;
                }
            }
            Ok(())
        })?)
    }

    fn reserve_margin(&mut self, side: Side, fraction: f64) -> Result<bool> {
        Ok(Python::with_gil(|py| -> PyResult<_> {
            let fig = self.figure.bind(py);
            // Subplot parameters only move axes placed on the figure itself.
            if !fig.call_method0("get_layout_engine")?.is_none()
                || !fig.getattr("subfigs")?.is_empty()? {
                return Ok(false)
            }
            let current: f64 = fig.getattr("subplotpars")?
                .getattr(side.as_str())?.extract()?;
            // Keep at least a tenth of the figure for the axes.
            let value = match side {
                Side::Left | Side::Bottom => (current + fraction).min(0.45),
                Side::Right | Side::Top => (current - fraction).max(0.55),
            };
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item(side.as_str(), value)?;
            fig.call_method("subplots_adjust", (), Some(&kwargs))?;
            Ok(true)
        })?)
    }

    fn legend_follows_margin(&self) -> bool {
        matches!(self.frame, Frame::Axes { .. })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_options() {
        let opts = GridOptions::default();
        assert!(opts.visible);
        assert_eq!((opts.tick_direction, opts.labelsize), (None, None));
        let opts = opts.tick_direction(TickDirection::InOut).labelsize(8.);
        assert_eq!(opts.tick_direction.map(|d| d.as_str()), Some("inout"));
        assert_eq!(opts.labelsize, Some(8.));
        assert_eq!(opts.visible(false).labelsize(0.).labelsize, None);
    }
}
