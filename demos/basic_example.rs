// Example for the README

use nested_grid_plotter::{Group, LegendOptions, Mosaic, Plotter, Side};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let layout = Group::new(1, 2)
        .child("left", Mosaic::new([["a"], ["b"]]).sharex(true))
        .child("right", Mosaic::parse("c"));
    let plotter = Plotter::with_layout(&layout.into())?;
    plotter.get_axis("a")?.plot(&[1., 2., 3.], &[1., 4., 9.])
        .label("square").draw()?;
    plotter.add_axis_legend_outside_frame("a", Side::Bottom,
                                          &LegendOptions::default())?;
    plotter.savefig("demos/basic_example.png")?;
    Ok(())
}
