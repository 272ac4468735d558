//! Checks against a real Matplotlib.  Every test is skipped (and passes)
//! when Matplotlib cannot be imported.

use nested_grid_plotter::{
    self as ngp, align_axes, align_axes_on_values, imshow, Anchor, Dim,
    Error, GridOptions, Group, Layout, LegendOptions, Mosaic, Plotter, Side,
    Surface, TickDirection,
};
use ndarray::Array2;

/// Run `f` unless Matplotlib is missing.
fn with_matplotlib(f: impl FnOnce() -> Result<(), Error>) -> Result<(), Error> {
    match f() {
        Err(Error::NoMatplotlib) => {
            eprintln!("Matplotlib not found, test skipped");
            Ok(())
        }
        r => r,
    }
}

fn nested() -> Layout {
    Group::new(1, 2)
        .child("left", Mosaic::new([["a"], ["b"]]).sharex(true))
        .child("right", Group::new(2, 1)
               .child("top", Mosaic::parse("cd"))
               .child("bottom", Mosaic::parse("ee")))
        .into()
}

#[test]
fn nested_layout_names() -> Result<(), Error> {
    with_matplotlib(|| {
        let plotter = Plotter::with_layout(&nested())?;
        let names: Vec<_> = plotter.axes().names().collect();
        assert_eq!(names, ["a", "b", "c", "d", "e"]);
        let sfs: Vec<_> = plotter.subfigures().keys().cloned().collect();
        assert_eq!(sfs, ["left", "right", "top", "bottom"]);
        let right: Vec<_> = plotter.get_subfigure_axes("right")?
            .into_keys().collect();
        assert_eq!(right, ["c", "d", "e"]);
        assert!(matches!(plotter.get_axis("z"), Err(Error::UnknownName(_))));
        plotter.identify_axes(24.)?;
        plotter.savefig("target/nested_layout_names.png")?;
        plotter.close()
    })
}

#[test]
fn default_children() -> Result<(), Error> {
    with_matplotlib(|| {
        let plotter = Plotter::with_layout(&Group::new(1, 2).into())?;
        let names: Vec<_> = plotter.axes().names().collect();
        assert_eq!(names, ["subfig_1_ax1-1", "subfig_2_ax1-1"]);
        plotter.close()
    })
}

#[test]
fn duplicate_names_are_rejected() {
    let layout = Group::new(1, 2)
        .child("left", Mosaic::parse("a"))
        .child("right", Mosaic::parse("a"));
    let r = Plotter::with_layout(&layout.into());
    assert!(matches!(r, Err(Error::DuplicateName { .. })));
}

#[test]
fn aligned_ticks() -> Result<(), Error> {
    with_matplotlib(|| {
        let plotter = Plotter::with_layout(&Mosaic::parse("ab").into())?;
        let mut axes = plotter.get_axes(&["a", "b"])?;
        axes[0].plot(&[0., 1.], &[0., 10.]).draw()?;
        axes[1].plot(&[0., 1.], &[0., 3.]).draw()?;
        let before: Vec<_> = axes.iter().map(|a| a.limits(Dim::Y))
            .collect::<Result<_, _>>()?;
        let ticks = align_axes(&mut axes, Dim::Y)?;
        assert!(!ticks.is_empty());
        for (ax, lim) in axes.iter().zip(before) {
            assert_eq!(ax.ticks(Dim::Y)?, ticks);
            assert_eq!(ax.limits(Dim::Y)?, lim);
        }
        align_axes_on_values(&mut axes, Dim::X, &[0., 0.5, 1.])?;
        assert_eq!(axes[1].ticks(Dim::X)?, [0., 0.5, 1.]);
        plotter.close()
    })
}

#[test]
fn legends_do_not_overlap() -> Result<(), Error> {
    with_matplotlib(|| {
        let mut plotter = Plotter::with_layout(&nested())?;
        let x: Vec<f64> = (0 .. 20).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|x| x * x).collect();
        for name in ["a", "b", "c"] {
            let mut ax = plotter.get_axis(name)?;
            ax.plot(&x, &y).label("square").draw()?;
            ax.set_xlabel("time")?.set_title(name)?;
        }
        let mut twin = plotter.get_axis("a")?.twinx()?;
        twin.plot(&x, &x).label("identity").draw()?;
        let extra = plotter.get_axis("c")?.scatter(&[1.], &[1.], None)?;
        plotter.add_extra_legend_item("c", extra, "marker")?;
        assert!(plotter.add_axis_legend("d", &LegendOptions::default())?
                .is_none(), "nothing plotted in d");

        let opts = LegendOptions::default();
        let bottom = plotter.add_axis_legend_outside_frame(
            "a", Side::Bottom, &opts)?.expect("a has items");
        assert!(bottom.placement.is_clean(), "{:?}", bottom.placement);
        let right = plotter.add_axis_legend_outside_frame(
            "b", Side::Right, &opts.clone().ncols(1))?.expect("b has items");
        assert!(right.placement.overlap >= 0.);
        let inside = plotter.add_axis_legend_inside("c", Anchor::UpperLeft, &opts)?
            .expect("c has items");
        assert!(inside.placement.is_clean(), "{:?}", inside.placement);
        let top = plotter.add_fig_legend(Some("right"), Side::Top, &opts)?
            .expect("right has items");
        assert!(top.placement.is_clean(), "{:?}", top.placement);
        let bottom = plotter.add_fig_legend(None, Side::Bottom, &opts)?
            .expect("the figure has items");
        assert!(bottom.placement.is_clean(), "{:?}", bottom.placement);
        plotter.add_grid_to_all_axes(
            Some("left"), &GridOptions::default().tick_direction(TickDirection::In))?;
        plotter.savefig("target/legends_do_not_overlap.png")?;

        plotter.clear_all_axes()?;
        assert!(plotter.add_fig_legend(None, Side::Bottom, &opts)?.is_none());
        plotter.close()
    })
}

#[test]
fn shared_colorbar() -> Result<(), Error> {
    with_matplotlib(|| {
        let plotter = Plotter::with_layout(&Mosaic::parse("ab").into())?;
        let a = Array2::from_shape_fn((10, 6), |(i, j)| (i + j) as f64);
        let b = Array2::from_shape_fn((10, 6), |(i, j)| i as f64 - j as f64);
        let axes = plotter.get_axes(&["a", "b"])?;
        let opts = imshow::ImshowOptions::default()
            .scale(imshow::ColorScale::Symmetric)
            .cbar_title("value");
        imshow::multi_imshow(&axes, &plotter.get_subfigure("fig")?,
                             &[("sum", a.view()), ("difference", b.view())],
                             &opts)?;
        imshow::add_2d_grid(&axes[0], 10, 6)?;
        let r = imshow::multi_imshow(&axes[.. 1], &plotter.get_subfigure("fig")?,
                                     &[], &opts);
        assert!(matches!(r, Err(Error::Mismatch(_))));
        plotter.savefig("target/shared_colorbar.png")?;
        plotter.close()
    })
}

#[test]
fn gif() -> Result<(), Error> {
    with_matplotlib(|| {
        let mut plotter = Plotter::new_default()?;
        let data: Vec<f64> = (0 .. 30).map(|i| i as f64).collect();
        let mut seen = vec![];
        let idx = ngp::Animation::new(4).save_gif(
            &mut plotter, "target/animation.gif", data.len(),
            |p, i| {
                seen.push(i);
                p.get_axis("ax1-1")?.plot_y(&data[..= i]).draw()?;
                Ok(())
            })?;
        assert_eq!(idx, [0, 10, 19, 29]);
        assert_eq!(seen, idx);
        plotter.close()
    })
}
