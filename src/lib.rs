//! Nested grids of named [Matplotlib][] subfigures and axes, driven
//! from [Rust][].
//!
//! Usage
//! -----
//!
//! A [`Plotter`] materializes a declarative [`Layout`] (mosaics of axes
//! nested in groups of subfigures) on a Matplotlib figure.  Every axis
//! and every subfigure is then reachable by its name.  Helpers align
//! ticks across axes ([`align`]), put legends where they cover nothing
//! and are not cropped on save ([`legend`]), plot several 2-D fields with
//! one colorbar ([`imshow`]) and write frame-by-frame animations
//! ([`animation`]).
//!
//! ```no_run
//! use nested_grid_plotter::{Group, Mosaic, Plotter, Side, LegendOptions};
//! let layout = Group::new(1, 2)
//!     .child("left", Mosaic::new([["a"], ["b"]]).sharex(true))
//!     .child("right", Mosaic::parse("c"));
//! let plotter = Plotter::with_layout(&layout.into())?;
//! plotter.get_axis("a")?.plot(&[1., 2., 3.], &[1., 4., 9.])
//!     .label("square").draw()?;
//! plotter.add_axis_legend_outside_frame("a", Side::Bottom,
//!                                       &LegendOptions::default())?;
//! plotter.savefig("target/nested.png")?;
//! # Ok::<(), nested_grid_plotter::Error>(())
//! ```
//!
//! [Rust]: https://www.rust-lang.org/
//! [Matplotlib]: https://matplotlib.org/

use lazy_static::lazy_static;
use pyo3::prelude::*;

/// Call the method `$m` of the Python object `$obj` (a `PyObject`),
/// discarding its result.
macro_rules! meth {
    ($obj: expr, $m: ident, $py: ident -> $args: expr) => {
        Python::with_gil(|py| {
            let $py = py;
            $obj.call_method1(py, stringify!($m), $args).map(|_| ())
        })
    };
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| {
            $obj.call_method1(py, stringify!($m), $args).map(|_| ())
        })
    };
}

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(|m| m.unbind()))
}}

lazy_static! {
    static ref FIGURE: PyResult<Py<PyModule>> = {
        pyimport!("matplotlib.figure")
    };
    static ref PYPLOT: PyResult<Py<PyModule>> = {
        pyimport!("matplotlib.pyplot")
    };
    static ref COLORS: PyResult<Py<PyModule>> = {
        pyimport!("matplotlib.colors")
    };
    static ref ANIMATION: PyResult<Py<PyModule>> = {
        pyimport!("matplotlib.animation")
    };
    static ref COPY: PyResult<Py<PyModule>> = {
        pyimport!("copy")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| $crate::Error::NoMatplotlib)
}}

pub mod error;
pub mod layout;
pub mod align;
pub mod legend;
pub mod mpl;
pub mod plotter;
pub mod imshow;
pub mod animation;

pub use error::{Error, Result};
pub use layout::{Container, Group, Grouped, Layout, Mosaic, NameIndex};
pub use align::{
    align_axes, align_axes_on_values, link_axes, link_x_axes, link_y_axes,
    make_axes_symmetric_zero_centered, Dim, Surface,
};
pub use legend::{
    Anchor, Placement, PlacementConfig, PlacementOverflow, Position, Side,
};
pub use mpl::{
    figure, show, Artist, Axes, Colorbar, Figure, FigureOptions,
    GridOptions, Legend, Savefig, SubFigure, TickDirection,
};
pub use plotter::{LegendOptions, PlacedLegend, Plotter};
pub use animation::{select_frame_indices, Animation};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
