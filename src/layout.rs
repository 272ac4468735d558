//! Declarative nested layouts and their materialization into named
//! subfigures and axes.
//!
//! A [`Layout`] is either a [`Mosaic`] (a grid of axis labels, where a
//! repeated label makes one axis spanning several cells) or a [`Group`]
//! (a grid of named child layouts, each drawn in its own subfigure).
//! [`build`] validates a layout and materializes it on any backend
//! implementing [`Container`], returning a [`NameIndex`] of the axes and
//! the created subfigures keyed by name.

use std::{
    borrow::Cow,
    collections::HashMap,
    ops::Range,
};
use indexmap::IndexMap;
use log::debug;

use crate::error::{Error, Result};

/// Name given to the root container by [`crate::Plotter`].
pub const ROOT_NAME: &str = "fig";

/// Marker of an empty cell in a [`Mosaic`], unless another one is set.
pub const DEFAULT_EMPTY_SENTINEL: &str = ".";

/// A rectangular grid of axis labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic {
    cells: Vec<Vec<String>>,
    empty_sentinel: String,
    sharex: bool,
    sharey: bool,
    width_ratios: Option<Vec<f64>>,
    height_ratios: Option<Vec<f64>>,
}

/// Cells covered by one label of a [`Mosaic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub label: String,
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Mosaic {
    /// Create a mosaic from its rows.
    ///
    /// ```
    /// use nested_grid_plotter::Mosaic;
    /// let m = Mosaic::new([["A panel", "A panel", "edge"],
    ///                      ["C panel", ".",       "edge"]]);
    /// assert_eq!(m.labels(), ["A panel", "edge", "C panel"]);
    /// ```
    pub fn new<R, C, S>(rows: R) -> Self
    where R: IntoIterator<Item = C>,
          C: IntoIterator<Item = S>,
          S: Into<String> {
        let cells = rows.into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Mosaic { cells,
                 empty_sentinel: DEFAULT_EMPTY_SENTINEL.to_owned(),
                 sharex: false,
                 sharey: false,
                 width_ratios: None,
                 height_ratios: None }
    }

    /// Parse the compact notation where each character is a cell.  Rows
    /// are either separated by `;` (`"AB;CC"`) or given one per line,
    /// blank lines and surrounding whitespace being ignored.
    pub fn parse(s: &str) -> Self {
        let rows: Vec<&str> = if s.contains('\n') {
            s.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
        } else {
            s.split(';').map(str::trim).collect()
        };
        Mosaic::new(rows.into_iter()
                    .map(|r| r.chars().map(String::from).collect::<Vec<_>>()))
    }

    /// Share the x-axis among all axes of the mosaic.
    #[must_use]
    pub fn sharex(mut self, share: bool) -> Self {
        self.sharex = share;
        self
    }

    /// Share the y-axis among all axes of the mosaic.
    #[must_use]
    pub fn sharey(mut self, share: bool) -> Self {
        self.sharey = share;
        self
    }

    #[must_use]
    pub fn width_ratios(mut self, r: impl Into<Vec<f64>>) -> Self {
        self.width_ratios = Some(r.into());
        self
    }

    #[must_use]
    pub fn height_ratios(mut self, r: impl Into<Vec<f64>>) -> Self {
        self.height_ratios = Some(r.into());
        self
    }

    /// Set the label meaning "leave this cell empty" (default `"."`).
    #[must_use]
    pub fn empty_sentinel(mut self, s: impl Into<String>) -> Self {
        self.empty_sentinel = s.into();
        self
    }

    pub fn cells(&self) -> &[Vec<String>] { &self.cells }
    pub fn nrows(&self) -> usize { self.cells.len() }
    pub fn ncols(&self) -> usize { self.cells.first().map_or(0, Vec::len) }
    pub fn is_sharex(&self) -> bool { self.sharex }
    pub fn is_sharey(&self) -> bool { self.sharey }
    pub fn get_width_ratios(&self) -> Option<&[f64]> {
        self.width_ratios.as_deref()
    }
    pub fn get_height_ratios(&self) -> Option<&[f64]> {
        self.height_ratios.as_deref()
    }
    pub fn get_empty_sentinel(&self) -> &str { &self.empty_sentinel }

    /// Distinct labels, in row-major order of first appearance, empty
    /// cells excluded.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = vec![];
        for cell in self.cells.iter().flatten() {
            if *cell != self.empty_sentinel && !labels.contains(&cell.as_str()) {
                labels.push(cell);
            }
        }
        labels
    }

    /// Bounding rows and columns of every label, in the order of
    /// [`Mosaic::labels`].
    pub fn spans(&self) -> Vec<Span> {
        let mut spans: IndexMap<&str, Span> = IndexMap::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if *cell == self.empty_sentinel { continue }
                let span = spans.entry(cell.as_str()).or_insert_with(|| Span {
                    label: cell.clone(), rows: r .. r + 1, cols: c .. c + 1 });
                span.rows.start = span.rows.start.min(r);
                span.rows.end = span.rows.end.max(r + 1);
                span.cols.start = span.cols.start.min(c);
                span.cols.end = span.cols.end.max(c + 1);
            }
        }
        spans.into_values().collect()
    }

    fn validate(&self, owner: &str) -> Result<()> {
        let malformed = |reason: String| Error::MalformedMosaic {
            owner: owner.to_owned(), reason };
        let ncols = self.ncols();
        if self.nrows() == 0 || ncols == 0 {
            return Err(malformed("the mosaic has no cell".into()))
        }
        for (r, row) in self.cells.iter().enumerate() {
            if row.len() != ncols {
                return Err(malformed(format!(
                    "row {r} has {} cells whereas row 0 has {ncols}",
                    row.len())))
            }
        }
        check_ratios(self.width_ratios.as_deref(), ncols, "width")
            .map_err(malformed)?;
        check_ratios(self.height_ratios.as_deref(), self.nrows(), "height")
            .map_err(malformed)?;
        for span in self.spans() {
            let filled = self.cells[span.rows.clone()].iter()
                .flat_map(|row| &row[span.cols.clone()])
                .filter(|cell| **cell == span.label)
                .count();
            if filled != span.rows.len() * span.cols.len() {
                return Err(malformed(format!(
                    "the cells labelled {:?} do not form a rectangle",
                    span.label)))
            }
        }
        Ok(())
    }
}

fn check_ratios(ratios: Option<&[f64]>, n: usize, what: &str)
                -> std::result::Result<(), String> {
    let Some(ratios) = ratios else { return Ok(()) };
    if ratios.len() != n {
        return Err(format!("{} {what} ratios given for {n} tracks",
                           ratios.len()))
    }
    if ratios.iter().any(|r| !r.is_finite() || *r <= 0.) {
        return Err(format!("{what} ratios must be positive and finite"))
    }
    Ok(())
}

/// A grid of named child layouts, each drawn in its own subfigure.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    nrows: usize,
    ncols: usize,
    wspace: Option<f64>,
    hspace: Option<f64>,
    width_ratios: Option<Vec<f64>>,
    height_ratios: Option<Vec<f64>>,
    children: Vec<(String, Layout)>,
}

impl Group {
    /// A group of `nrows` × `ncols` subfigures.  Children are added in
    /// row-major order with [`Group::child`]; when none is added, each
    /// subfigure receives a single axis (see [`Group::children_of`]).
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Group { nrows, ncols,
                wspace: None, hspace: None,
                width_ratios: None, height_ratios: None,
                children: vec![] }
    }

    #[must_use]
    pub fn child(mut self, name: impl Into<String>,
                 layout: impl Into<Layout>) -> Self {
        self.children.push((name.into(), layout.into()));
        self
    }

    /// Horizontal space between subfigures, as a fraction of the
    /// average subfigure width.
    #[must_use]
    pub fn wspace(mut self, w: f64) -> Self {
        self.wspace = Some(w);
        self
    }

    /// Vertical space between subfigures, as a fraction of the average
    /// subfigure height.
    #[must_use]
    pub fn hspace(mut self, h: f64) -> Self {
        self.hspace = Some(h);
        self
    }

    #[must_use]
    pub fn width_ratios(mut self, r: impl Into<Vec<f64>>) -> Self {
        self.width_ratios = Some(r.into());
        self
    }

    #[must_use]
    pub fn height_ratios(mut self, r: impl Into<Vec<f64>>) -> Self {
        self.height_ratios = Some(r.into());
        self
    }

    pub fn nrows(&self) -> usize { self.nrows }
    pub fn ncols(&self) -> usize { self.ncols }
    pub fn get_wspace(&self) -> Option<f64> { self.wspace }
    pub fn get_hspace(&self) -> Option<f64> { self.hspace }
    pub fn get_width_ratios(&self) -> Option<&[f64]> {
        self.width_ratios.as_deref()
    }
    pub fn get_height_ratios(&self) -> Option<&[f64]> {
        self.height_ratios.as_deref()
    }

    /// Children as declared (possibly empty).
    pub fn children(&self) -> &[(String, Layout)] { &self.children }

    /// Children the group materializes when it is named `name`.  Without
    /// declared children, subfigure `n` (from 1, row-major) is named
    /// `<name>_<n>` (`subfig_<n>` for the root) and holds one axis named
    /// `<subfigure>_ax1-1`.
    pub fn children_of(&self, name: &str) -> Cow<'_, [(String, Layout)]> {
        if !self.children.is_empty() {
            return Cow::Borrowed(&self.children)
        }
        let prefix = if name == ROOT_NAME { "subfig" } else { name };
        Cow::Owned((1 ..= self.nrows * self.ncols).map(|n| {
            let sub = format!("{prefix}_{n}");
            let ax = format!("{sub}_ax1-1");
            (sub, Layout::Mosaic(Mosaic::new([[ax]])))
        }).collect())
    }

    fn validate(&self, owner: &str) -> Result<()> {
        let shape = |reason: String| Error::GroupShape {
            owner: owner.to_owned(), reason };
        if self.nrows == 0 || self.ncols == 0 {
            return Err(shape(format!("cannot create {} × {} subfigures",
                                     self.nrows, self.ncols)))
        }
        let expected = self.nrows * self.ncols;
        if !self.children.is_empty() && self.children.len() != expected {
            return Err(shape(format!(
                "{} children have been provided, but there are {} rows \
                 and {} cols, i.e., {expected} children expected",
                self.children.len(), self.nrows, self.ncols)))
        }
        check_ratios(self.width_ratios.as_deref(), self.ncols, "width")
            .map_err(shape)?;
        check_ratios(self.height_ratios.as_deref(), self.nrows, "height")
            .map_err(shape)
    }
}

/// A node of a nested layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    Mosaic(Mosaic),
    Group(Group),
}

impl From<Mosaic> for Layout {
    fn from(m: Mosaic) -> Self { Layout::Mosaic(m) }
}

impl From<Group> for Layout {
    fn from(g: Group) -> Self { Layout::Group(g) }
}

impl Default for Layout {
    /// A single axis named `ax1-1`.
    fn default() -> Self { Layout::Mosaic(Mosaic::new([["ax1-1"]])) }
}

/// Check that `layout`, whose root is called `root_name`, can be
/// materialized: well formed mosaics and groups, and no name used twice
/// anywhere in the tree.
pub fn validate(root_name: &str, layout: &Layout) -> Result<()> {
    let mut seen = HashMap::new();
    seen.insert(root_name.to_owned(), root_name.to_owned());
    validate_node(root_name, root_name, layout, &mut seen)
}

fn register(name: &str, path: String,
            seen: &mut HashMap<String, String>) -> Result<()> {
    if let Some(first) = seen.get(name) {
        return Err(Error::DuplicateName { name: name.to_owned(),
                                          first: first.clone(),
                                          second: path })
    }
    seen.insert(name.to_owned(), path);
    Ok(())
}

fn validate_node(name: &str, path: &str, layout: &Layout,
                 seen: &mut HashMap<String, String>) -> Result<()> {
    match layout {
        Layout::Mosaic(mosaic) => {
            mosaic.validate(name)?;
            for label in mosaic.labels() {
                register(label, format!("{path}/{label}"), seen)?;
            }
        }
        Layout::Group(group) => {
            group.validate(name)?;
            for (child, sub) in group.children_of(name).iter() {
                let child_path = format!("{path}/{child}");
                register(child, child_path.clone(), seen)?;
                validate_node(child, &child_path, sub, seen)?;
            }
        }
    }
    Ok(())
}

/// Drawing containers able to host a [`Layout`] (a Matplotlib figure or
/// subfigure, or a test double).
pub trait Container: Clone {
    type Surface: Clone;

    /// Create the `nrows × ncols` subfigures of `group`, returned in
    /// row-major order.
    fn subfigures(&self, group: &Group) -> Result<Vec<Self>>;

    /// Create the axes of `mosaic`, keyed by label.
    fn subplot_mosaic(&self, mosaic: &Mosaic)
                      -> Result<IndexMap<String, Self::Surface>>;
}

/// Name tree mirroring the shape of a [`Layout`]: every named node is a
/// branch, every axis a leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Grouped<S> {
    Leaf(S),
    Branch(IndexMap<String, Grouped<S>>),
}

impl<S> Grouped<S> {
    /// Depth-first search for the node called `name` below `self`.
    pub fn find(&self, name: &str) -> Option<&Grouped<S>> {
        let Grouped::Branch(children) = self else { return None };
        if let Some(node) = children.get(name) {
            return Some(node)
        }
        children.values().find_map(|c| c.find(name))
    }

    fn collect_leaves<'a>(&'a self, out: &mut IndexMap<&'a str, &'a S>) {
        let Grouped::Branch(children) = self else { return };
        for (n, c) in children {
            match c {
                Grouped::Leaf(s) => { out.insert(n.as_str(), s); }
                Grouped::Branch(_) => c.collect_leaves(out),
            }
        }
    }
}

/// Grouped and flattened views of the surfaces of a materialized layout.
/// Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct NameIndex<S> {
    root: String,
    grouped: Grouped<S>,
    flat: IndexMap<String, S>,
}

impl<S> NameIndex<S> {
    pub fn root_name(&self) -> &str { &self.root }

    /// Tree of the root container.
    pub fn grouped(&self) -> &Grouped<S> { &self.grouped }

    /// Label → surface, in materialization order.
    pub fn flat(&self) -> &IndexMap<String, S> { &self.flat }

    pub fn len(&self) -> usize { self.flat.len() }
    pub fn is_empty(&self) -> bool { self.flat.is_empty() }
    pub fn contains(&self, name: &str) -> bool { self.flat.contains_key(name) }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flat.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &S)> {
        self.flat.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Result<&S> {
        self.flat.get(name).ok_or_else(|| Error::UnknownName(name.to_owned()))
    }

    /// The node called `name` (the root included).
    pub fn find(&self, name: &str) -> Option<&Grouped<S>> {
        if name == self.root { Some(&self.grouped) }
        else { self.grouped.find(name) }
    }

    /// Every surface below the node `name`, by label.
    pub fn leaves_under(&self, name: &str) -> Result<IndexMap<&str, &S>> {
        let node = self.find(name)
            .ok_or_else(|| Error::UnknownName(name.to_owned()))?;
        let mut out = IndexMap::new();
        match node {
            Grouped::Leaf(_) => {
                if let Some((k, v)) = self.flat.get_key_value(name) {
                    out.insert(k.as_str(), v);
                }
            }
            Grouped::Branch(_) => node.collect_leaves(&mut out),
        }
        Ok(out)
    }
}

/// Result of [`build`].
#[derive(Debug, Clone)]
pub struct Materialized<C, S> {
    pub axes: NameIndex<S>,
    /// Every non-root node, in materialization order.
    pub subfigures: IndexMap<String, C>,
}

/// Validate `layout` and materialize it in `root`.
///
/// Materialization is depth-first: a group creates all its subfigures
/// before any of its children is materialized, children being visited
/// left to right then top to bottom.
pub fn build<C: Container>(root: &C, root_name: &str, layout: &Layout)
                           -> Result<Materialized<C, C::Surface>> {
    validate(root_name, layout)?;
    let mut flat = IndexMap::new();
    let mut subfigures = IndexMap::new();
    let grouped = materialize(root, root_name, layout,
                              &mut flat, &mut subfigures)?;
    debug!("materialized {:?}: {} axes, {} subfigures",
           root_name, flat.len(), subfigures.len());
    Ok(Materialized {
        axes: NameIndex { root: root_name.to_owned(), grouped, flat },
        subfigures,
    })
}

fn materialize<C: Container>(
    container: &C, name: &str, layout: &Layout,
    flat: &mut IndexMap<String, C::Surface>,
    subfigures: &mut IndexMap<String, C>,
) -> Result<Grouped<C::Surface>> {
    match layout {
        Layout::Mosaic(mosaic) => {
            let mut created = container.subplot_mosaic(mosaic)?;
            let mut branch = IndexMap::new();
            for label in mosaic.labels() {
                let surface = created.shift_remove(label).ok_or_else(|| {
                    Error::Mismatch(format!(
                        "no axis {label:?} was created in {name:?}"))
                })?;
                flat.insert(label.to_owned(), surface.clone());
                branch.insert(label.to_owned(), Grouped::Leaf(surface));
            }
            Ok(Grouped::Branch(branch))
        }
        Layout::Group(group) => {
            let children = group.children_of(name);
            let created = container.subfigures(group)?;
            if created.len() != children.len() {
                return Err(Error::Mismatch(format!(
                    "{} subfigures were created in {name:?}, {} expected",
                    created.len(), children.len())))
            }
            for ((child, _), sub) in children.iter().zip(&created) {
                subfigures.insert(child.clone(), sub.clone());
            }
            let mut branch = IndexMap::new();
            for ((child, sub_layout), sub) in children.iter().zip(&created) {
                let node = materialize(sub, child, sub_layout,
                                       flat, subfigures)?;
                branch.insert(child.clone(), node);
            }
            Ok(Grouped::Branch(branch))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    /// Records the calls it receives; surfaces are "<container>:<label>".
    #[derive(Debug, Clone)]
    struct Fake {
        name: String,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Fake {
        fn root() -> Self {
            Fake { name: "root".into(), calls: Rc::default() }
        }

        fn calls(&self) -> Vec<String> { self.calls.borrow().clone() }
    }

    impl Container for Fake {
        type Surface = String;

        fn subfigures(&self, group: &Group) -> Result<Vec<Self>> {
            self.calls.borrow_mut().push(format!(
                "subfigures {} {}x{}", self.name, group.nrows(), group.ncols()));
            Ok((0 .. group.nrows() * group.ncols()).map(|i| Fake {
                name: format!("{}[{i}]", self.name),
                calls: self.calls.clone() }).collect())
        }

        fn subplot_mosaic(&self, mosaic: &Mosaic)
                          -> Result<IndexMap<String, String>> {
            self.calls.borrow_mut().push(format!("mosaic {}", self.name));
            Ok(mosaic.labels().into_iter()
               .map(|l| (l.to_owned(), format!("{}:{l}", self.name)))
               .collect())
        }
    }

    fn nested() -> Layout {
        Group::new(1, 2)
            .child("left", Mosaic::new([["a", "b"], ["c", "c"]]))
            .child("right", Group::new(2, 1)
                   .child("top", Mosaic::new([["d"]]))
                   .child("bottom", Mosaic::parse("e")))
            .into()
    }

    fn keys<S>(node: &Grouped<S>) -> Vec<&str> {
        match node {
            Grouped::Branch(m) => m.keys().map(String::as_str).collect(),
            Grouped::Leaf(_) => vec![],
        }
    }

    #[test]
    fn default_layout_has_one_axis() -> Result<()> {
        let root = Fake::root();
        let m = build(&root, ROOT_NAME, &Layout::default())?;
        assert_eq!(m.axes.names().collect::<Vec<_>>(), ["ax1-1"]);
        assert_eq!(m.axes.get("ax1-1")?, "root:ax1-1");
        assert!(m.subfigures.is_empty());
        Ok(())
    }

    #[test]
    fn nested_flat_and_grouped_views() -> Result<()> {
        let root = Fake::root();
        let m = build(&root, ROOT_NAME, &nested())?;
        assert_eq!(m.axes.names().collect::<Vec<_>>(),
                   ["a", "b", "c", "d", "e"]);
        assert_eq!(m.subfigures.keys().collect::<Vec<_>>(),
                   ["left", "right", "top", "bottom"]);
        assert_eq!(keys(m.axes.grouped()), ["left", "right"]);
        assert_eq!(keys(m.axes.find("left").unwrap()), ["a", "b", "c"]);
        assert_eq!(keys(m.axes.find("right").unwrap()), ["top", "bottom"]);
        assert_eq!(keys(m.axes.find("bottom").unwrap()), ["e"]);
        assert_eq!(m.axes.find("e"),
                   Some(&Grouped::Leaf("root[1][1]:e".to_string())));
        Ok(())
    }

    #[test]
    fn materialization_order_is_depth_first() -> Result<()> {
        let root = Fake::root();
        build(&root, ROOT_NAME, &nested())?;
        assert_eq!(root.calls(), ["subfigures root 1x2",
                                  "mosaic root[0]",
                                  "subfigures root[1] 2x1",
                                  "mosaic root[1][0]",
                                  "mosaic root[1][1]"]);
        Ok(())
    }

    #[test]
    fn leaves_under_a_subfigure() -> Result<()> {
        let m = build(&Fake::root(), ROOT_NAME, &nested())?;
        let right = m.axes.leaves_under("right")?;
        assert_eq!(right.keys().copied().collect::<Vec<_>>(), ["d", "e"]);
        assert_eq!(m.axes.leaves_under(ROOT_NAME)?.len(), 5);
        assert_eq!(m.axes.leaves_under("c")?.keys().copied()
                   .collect::<Vec<_>>(), ["c"]);
        assert!(matches!(m.axes.leaves_under("nope"),
                         Err(Error::UnknownName(n)) if n == "nope"));
        assert!(matches!(m.axes.get("nope"), Err(Error::UnknownName(_))));
        Ok(())
    }

    #[test]
    fn duplicate_label_in_two_mosaics() {
        let layout: Layout = Group::new(1, 2)
            .child("left", Mosaic::new([["a", "b"]]))
            .child("right", Mosaic::new([["c", "a"]]))
            .into();
        let root = Fake::root();
        match build(&root, ROOT_NAME, &layout) {
            Err(Error::DuplicateName { name, first, second }) => {
                assert_eq!(name, "a");
                assert_eq!(first, "fig/left/a");
                assert_eq!(second, "fig/right/a");
            }
            r => panic!("expected DuplicateName, got {r:?}"),
        }
        assert!(root.calls().is_empty(), "nothing is created");
    }

    #[test]
    fn duplicate_between_group_and_label() {
        let layout: Layout = Group::new(2, 1)
            .child("x", Mosaic::new([["a"]]))
            .child("y", Group::new(1, 1).child("a", Mosaic::new([["b"]])))
            .into();
        assert!(matches!(validate(ROOT_NAME, &layout),
                         Err(Error::DuplicateName { name, .. }) if name == "a"));
        let deep: Layout = Group::new(1, 1)
            .child("x", Group::new(1, 1).child("fig", Mosaic::new([["b"]])))
            .into();
        assert!(matches!(validate(ROOT_NAME, &deep),
                         Err(Error::DuplicateName { name, .. }) if name == "fig"));
    }

    #[test]
    fn malformed_mosaics() {
        let ragged: Layout = Mosaic::new(vec![vec!["a", "b"], vec!["c"]]).into();
        let l_shape: Layout = Mosaic::new([["a", "a"], ["a", "b"]]).into();
        let ratios: Layout = Mosaic::new([["a", "b"]])
            .width_ratios([1., 2., 3.]).into();
        let empty: Layout = Mosaic::new(Vec::<Vec<String>>::new()).into();
        for layout in [ragged, l_shape, ratios, empty] {
            assert!(matches!(validate(ROOT_NAME, &layout),
                             Err(Error::MalformedMosaic { .. })),
                    "{layout:?}");
        }
    }

    #[test]
    fn empty_cells_are_allowed() -> Result<()> {
        let layout: Layout = Mosaic::new([["a", "."], ["b", "b"]]).into();
        let m = build(&Fake::root(), ROOT_NAME, &layout)?;
        assert_eq!(m.axes.names().collect::<Vec<_>>(), ["a", "b"]);
        Ok(())
    }

    #[test]
    fn group_with_wrong_number_of_children() {
        let layout: Layout = Group::new(2, 2)
            .child("a", Mosaic::new([["x"]]))
            .into();
        assert!(matches!(validate(ROOT_NAME, &layout),
                         Err(Error::GroupShape { .. })));
        let zero: Layout = Group::new(0, 2).into();
        assert!(matches!(validate(ROOT_NAME, &zero),
                         Err(Error::GroupShape { .. })));
    }

    #[test]
    fn default_children_names() -> Result<()> {
        let layout: Layout = Group::new(1, 2).into();
        let m = build(&Fake::root(), ROOT_NAME, &layout)?;
        assert_eq!(m.subfigures.keys().collect::<Vec<_>>(),
                   ["subfig_1", "subfig_2"]);
        assert_eq!(m.axes.names().collect::<Vec<_>>(),
                   ["subfig_1_ax1-1", "subfig_2_ax1-1"]);

        let layout: Layout = Group::new(1, 1).child("g", Group::new(2, 1)).into();
        let m = build(&Fake::root(), ROOT_NAME, &layout)?;
        assert_eq!(m.subfigures.keys().collect::<Vec<_>>(), ["g", "g_1", "g_2"]);
        Ok(())
    }

    #[test]
    fn compact_notation() {
        let m = Mosaic::parse("AB;CC");
        assert_eq!(m.spans(), [
            Span { label: "A".into(), rows: 0 .. 1, cols: 0 .. 1 },
            Span { label: "B".into(), rows: 0 .. 1, cols: 1 .. 2 },
            Span { label: "C".into(), rows: 1 .. 2, cols: 0 .. 2 },
        ]);
        let m = Mosaic::parse("
            AAE
            C.E
        ");
        assert_eq!((m.nrows(), m.ncols()), (2, 3));
        assert_eq!(m.labels(), ["A", "E", "C"]);
        assert_eq!(m.spans()[1].rows, 0 .. 2);
    }
}
