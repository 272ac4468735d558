// Nested subfigures with figure and axes legends, and a GIF.

use nested_grid_plotter::{
    imshow::{self, ColorScale, ImshowOptions},
    Anchor, Animation, GridOptions, Group, LegendOptions, Mosaic, Plotter,
    Side, TickDirection,
};
use ndarray::Array2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let layout = Group::new(2, 1)
        .height_ratios([2., 1.])
        .child("curves", Group::new(1, 2)
               .child("lin", Mosaic::parse("AB").sharey(true))
               .child("quad", Mosaic::parse("C")))
        .child("fields", Mosaic::parse("DE"));
    let mut plotter = Plotter::with_layout(&layout.into())?;

    let x: Vec<f64> = (0 .. 40).map(|i| i as f64 / 4.).collect();
    for (name, k) in [("A", 1.), ("B", 2.), ("C", 3.)] {
        let y: Vec<f64> = x.iter().map(|x| k * x * x.cos()).collect();
        plotter.get_axis(name)?.plot(&x, &y).label(&format!("k = {k}")).draw()?;
    }
    plotter.add_grid_to_all_axes(
        Some("curves"),
        &GridOptions::default().tick_direction(TickDirection::In).labelsize(8.))?;
    let opts = LegendOptions::default().ncols(3);
    plotter.add_fig_legend(Some("curves"), Side::Bottom, &opts)?;
    plotter.add_axis_legend_inside("C", Anchor::UpperLeft,
                                   &LegendOptions::default())?;

    let d = Array2::from_shape_fn((30, 20), |(i, j)| (i as f64 / 5.).sin() * j as f64);
    let e = Array2::from_shape_fn((30, 20), |(i, j)| (j as f64 / 4.).cos() * i as f64);
    imshow::multi_imshow(
        &plotter.get_axes(&["D", "E"])?, &plotter.get_subfigure("fields")?,
        &[("D", d.view()), ("E", e.view())],
        &ImshowOptions::default().scale(ColorScale::Symmetric)
            .xlabel("x").ylabel("y").cbar_title("amplitude"))?;
    plotter.savefig("demos/nested_layout.png")?;

    let mut anim = Animation::new(8);
    anim.fps(4.);
    anim.save_gif(&mut plotter, "demos/nested_layout.gif", x.len(), |p, i| {
        let y: Vec<f64> = x[..= i].iter().map(|x| x * x.cos()).collect();
        p.get_axis("A")?.plot(&x[..= i], &y).draw()?;
        Ok(())
    })?;
    Ok(())
}
