//! The object-oriented entry point: a figure materialized from a
//! [`Layout`] whose axes and subfigures are all reachable by name.

use std::path::Path;
use indexmap::IndexMap;
use log::debug;
use pyo3::{prelude::*, types::PyDict};

use crate::{
    error::{Error, Result},
    layout::{self, Layout, NameIndex, ROOT_NAME},
    legend::{self, Anchor, Placement, PlacementConfig, Position, Side, Spot},
    mpl::{
        Artist, Axes, Figure, Frame, GridOptions, Legend, LegendGeometry,
        Savefig, SubFigure,
    },
    COPY,
};

/// Options shared by the legend builders of [`Plotter`].
#[derive(Debug, Clone)]
pub struct LegendOptions {
    shift: Option<(f64, f64)>,
    borderaxespad: f64,
    ncols: Option<usize>,
    title: Option<String>,
    fontsize: Option<f64>,
    placement: PlacementConfig,
}

impl Default for LegendOptions {
    fn default() -> Self {
        LegendOptions { shift: None, borderaxespad: 1., ncols: None,
                        title: None, fontsize: None,
                        placement: PlacementConfig::default() }
    }
}

impl LegendOptions {
    /// Shift, in frame fraction, of the point where the search for an
    /// outside location starts.
    #[must_use]
    pub fn shift(mut self, dx: f64, dy: f64) -> Self {
        self.shift = Some((dx, dy));
        self
    }

    /// Padding between the legend and its anchor, in font-size units.
    #[must_use]
    pub fn borderaxespad(mut self, pad: f64) -> Self {
        self.borderaxespad = pad;
        self
    }

    #[must_use]
    pub fn ncols(mut self, n: usize) -> Self {
        self.ncols = Some(n.max(1));
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn fontsize(mut self, size: f64) -> Self {
        self.fontsize = Some(size);
        self
    }

    #[must_use]
    pub fn placement(mut self, config: PlacementConfig) -> Self {
        self.placement = config;
        self
    }

    pub fn get_placement(&self) -> &PlacementConfig { &self.placement }

    fn set_kwargs(&self, kw: &Bound<'_, PyDict>) -> PyResult<()> {
        kw.set_item("borderaxespad", self.borderaxespad)?;
        if let Some(n) = self.ncols { kw.set_item("ncols", n)? }
        if let Some(t) = &self.title { kw.set_item("title", t)? }
        if let Some(s) = self.fontsize { kw.set_item("fontsize", s)? }
        Ok(())
    }

    /// Point, in frame fraction, at which the search for a location on
    /// `side` starts.
    fn start(&self, side: Side) -> (f64, f64) {
        let (x, y) = side.anchor();
        let (dx, dy) = self.shift.unwrap_or((0., 0.));
        (x + dx, y + dy)
    }
}

/// A legend and how its location was found.
#[derive(Debug, Clone)]
pub struct PlacedLegend {
    pub legend: Legend,
    pub placement: Placement,
}

/// A figure holding nested grids of named subfigures and axes.
pub struct Plotter {
    fig: Figure,
    root: SubFigure,
    axes: NameIndex<Axes>,
    subfigures: IndexMap<String, SubFigure>,
    extra_items: IndexMap<String, Vec<(Artist, String)>>,
}

impl Plotter {
    /// Materialize `layout` on `fig`.
    pub fn new(fig: Figure, layout: &Layout) -> Result<Self> {
        let root = fig.as_subfigure();
        let built = layout::build(&root, ROOT_NAME, layout)?;
        Ok(Plotter { fig, root, axes: built.axes,
                     subfigures: built.subfigures,
                     extra_items: IndexMap::new() })
    }

    /// Materialize `layout` on a new default [`Figure`].  The layout is
    /// checked before the figure is created.
    pub fn with_layout(layout: &Layout) -> Result<Self> {
        layout::validate(ROOT_NAME, layout)?;
        Plotter::new(Figure::new()?, layout)
    }

    /// A new figure with a single axis named `"ax1-1"`.
    pub fn new_default() -> Result<Self> {
        Plotter::with_layout(&Layout::default())
    }

    pub fn figure(&self) -> &Figure { &self.fig }

    /// Grouped and flattened views of all the axes.
    pub fn axes(&self) -> &NameIndex<Axes> { &self.axes }

    /// Every subfigure but the root one, by name.
    pub fn subfigures(&self) -> &IndexMap<String, SubFigure> {
        &self.subfigures
    }

    pub fn get_axis(&self, name: &str) -> Result<Axes> {
        self.axes.get(name).cloned()
    }

    pub fn get_axes(&self, names: &[&str]) -> Result<Vec<Axes>> {
        names.iter().map(|n| self.get_axis(n)).collect()
    }

    /// The subfigure `name`; [`ROOT_NAME`] designates the figure itself.
    pub fn get_subfigure(&self, name: &str) -> Result<SubFigure> {
        if name == ROOT_NAME {
            return Ok(self.root.clone())
        }
        self.subfigures.get(name).cloned()
            .ok_or_else(|| Error::UnknownName(name.to_owned()))
    }

    /// All the axes below the node `name`, in materialization order.
    pub fn get_subfigure_axes(&self, name: &str)
                              -> Result<IndexMap<String, Axes>> {
        Ok(self.axes.leaves_under(name)?.into_iter()
           .map(|(n, ax)| (n.to_owned(), ax.clone()))
           .collect())
    }

    /// Write the name of each axis in its center.
    pub fn identify_axes(&self, fontsize: f64) -> Result<()> {
        for (name, ax) in self.axes.iter() {
            ax.clone().identify(name, fontsize)?;
        }
        Ok(())
    }

    /// Show the grid of every axis, or only of those below `subfigure`.
    pub fn add_grid_to_all_axes(&self, subfigure: Option<&str>,
                                opts: &GridOptions) -> Result<()> {
        let name = subfigure.unwrap_or(ROOT_NAME);
        for (_, ax) in self.axes.leaves_under(name)? {
            ax.clone().set_grid(opts)?;
        }
        Ok(())
    }

    /// Register an item to add to the legends of the axis `name`, e.g. a
    /// proxy artist not drawn in the axes.
    pub fn add_extra_legend_item(&mut self, name: &str, handle: Artist,
                                 label: impl Into<String>) -> Result<()> {
        self.axes.get(name)?;
        self.extra_items.entry(name.to_owned()).or_default()
            .push((handle, label.into()));
        Ok(())
    }

    /// Items of the axis `name`, its twins and its extra items, without
    /// duplicated labels.
    fn axis_legend_items(&self, name: &str) -> Result<Vec<(Artist, String)>> {
        let mut items = self.axes.get(name)?.legend_items()?;
        if let Some(extra) = self.extra_items.get(name) {
            items.extend(extra.iter().cloned());
        }
        Ok(legend::dedup_legend_items(items))
    }

    /// Add a legend where Matplotlib puts it (`loc="best"`).  Return
    /// `None` if the axis has nothing to show.
    pub fn add_axis_legend(&self, name: &str, opts: &LegendOptions)
                           -> Result<Option<Legend>> {
        let items = self.axis_legend_items(name)?;
        if items.is_empty() {
            return Ok(None)
        }
        let ax = self.axes.get(name)?;
        Ok(Some(ax.legend(&items, |kw| opts.set_kwargs(kw))?))
    }

    /// Add a legend to the axis `name`, outside of its frame on `side`,
    /// clear of its tick labels, axis labels and title.
    pub fn add_axis_legend_outside_frame(
        &self, name: &str, side: Side, opts: &LegendOptions,
    ) -> Result<Option<PlacedLegend>> {
        let items = self.axis_legend_items(name)?;
        if items.is_empty() {
            return Ok(None)
        }
        let ax = self.axes.get(name)?;
        let (x, y) = opts.start(side);
        let legend = ax.legend(&items, |kw| {
            opts.set_kwargs(kw)?;
            kw.set_item("loc", "center")?;
            kw.set_item("bbox_to_anchor", (x, y))?;
            kw.set_item("bbox_transform", ax.obj().getattr(kw.py(), "transAxes")?)
        })?;
        let frame = Frame::Axes { ax: ax.obj().clone(), outside: true };
        let mut geometry = LegendGeometry::new(&self.fig, &legend, frame);
        let placement = legend::place(&mut geometry, Position::Outside(side),
                                      Spot::Point(x, y), &opts.placement)?;
        debug!("legend of {name:?} placed on the {} side in {} pass(es)",
               side.as_str(), placement.passes);
        Ok(Some(PlacedLegend { legend, placement }))
    }

    /// Add a legend inside the frame of the axis `name`, starting at
    /// `anchor` and trying the other named locations if it covers a
    /// decoration.
    pub fn add_axis_legend_inside(
        &self, name: &str, anchor: Anchor, opts: &LegendOptions,
    ) -> Result<Option<PlacedLegend>> {
        let items = self.axis_legend_items(name)?;
        if items.is_empty() {
            return Ok(None)
        }
        let ax = self.axes.get(name)?;
        let legend = ax.legend(&items, |kw| {
            opts.set_kwargs(kw)?;
            kw.set_item("loc", anchor.as_str())
        })?;
        let frame = Frame::Axes { ax: ax.obj().clone(), outside: false };
        let mut geometry = LegendGeometry::new(&self.fig, &legend, frame);
        let placement = legend::place(&mut geometry, Position::Inside(anchor),
                                      Spot::Named(anchor), &opts.placement)?;
        Ok(Some(PlacedLegend { legend, placement }))
    }

    /// Add a legend gathering the items of every axis below `name` (the
    /// whole figure if `None`) on `side` of that (sub)figure.  Previous
    /// legends of the (sub)figure are removed.
    pub fn add_fig_legend(&self, name: Option<&str>, side: Side,
                          opts: &LegendOptions)
                          -> Result<Option<PlacedLegend>> {
        let name = name.unwrap_or(ROOT_NAME);
        let target = self.get_subfigure(name)?;
        let axes = self.axes.leaves_under(name)?;
        let mut items = vec![];
        for ax_name in axes.keys() {
            items.extend(self.axis_legend_items(ax_name)?);
        }
        let items = legend::dedup_legend_items(items);
        if items.is_empty() {
            return Ok(None)
        }
        // An artist cannot be drawn in two figures.
        let copy = pymod!(COPY)?;
        let items = items.into_iter()
            .map(|(a, l)| Ok((a.for_figure(&target, copy)?, l)))
            .collect::<Result<Vec<_>>>()?;
        target.clear_legends()?;
        let (x, y) = opts.start(side);
        let legend = target.legend(&items, |kw| {
            opts.set_kwargs(kw)?;
            kw.set_item("loc", "center")?;
            kw.set_item("bbox_to_anchor", (x, y))?;
            kw.set_item("bbox_transform",
                        target.obj().getattr(kw.py(), "transSubfigure")?)
        })?;
        let frame = Frame::Container(
            target.obj().clone(),
            axes.values().map(|ax| ax.obj().clone()).collect());
        let mut geometry = LegendGeometry::new(&self.fig, &legend, frame);
        let placement = legend::place(&mut geometry, Position::Outside(side),
                                      Spot::Point(x, y), &opts.placement)?;
        Ok(Some(PlacedLegend { legend, placement }))
    }

    /// Clear every axis and forget the extra legend items and the
    /// figure legends.
    pub fn clear_all_axes(&mut self) -> Result<()> {
        for (_, ax) in self.axes.iter() {
            ax.clone().clear()?;
        }
        self.extra_items.clear();
        self.clear_fig_legends()
    }

    /// Remove the legends of the figure and of every subfigure.
    pub fn clear_fig_legends(&self) -> Result<()> {
        self.root.clear_legends()?;
        for sf in self.subfigures.values() {
            sf.clear_legends()?;
        }
        Ok(())
    }

    /// Saving configuration cropping the image to its content, figure
    /// legends and sup-titles included.
    pub fn save(&self) -> Result<Savefig> {
        let mut extra = self.root.floating_artists()?;
        for sf in self.subfigures.values() {
            extra.extend(sf.floating_artists()?);
        }
        let mut save = self.fig.save();
        save.tight(true).extra_artists(extra);
        Ok(save)
    }

    /// Save the figure to `path`; see [`Plotter::save`].
    pub fn savefig(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save()?.to_file(path)
    }

    /// Release the figure.
    pub fn close(self) -> Result<()> {
        self.fig.close()
    }
}
