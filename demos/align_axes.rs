// Two panels with different data ranges sharing the same y ticks, and a
// third one centered on zero.

use nested_grid_plotter::{
    align_axes, make_axes_symmetric_zero_centered, Dim, Mosaic, Plotter,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let plotter = Plotter::with_layout(&Mosaic::parse("abc").into())?;
    let x: Vec<f64> = (0 .. 50).map(|i| i as f64 / 10.).collect();
    let mut axes = plotter.get_axes(&["a", "b", "c"])?;
    let sin: Vec<f64> = x.iter().map(|x| 3. * x.sin()).collect();
    let exp: Vec<f64> = x.iter().map(|x| x.exp() / 20.).collect();
    let lin: Vec<f64> = x.iter().map(|x| x - 1.).collect();
    axes[0].plot(&x, &sin).draw()?;
    axes[1].plot(&x, &exp).fmt("r").draw()?;
    axes[2].plot(&x, &lin).fmt("g--").draw()?;

    let ticks = align_axes(&mut axes[.. 2], Dim::Y)?;
    println!("shared y ticks: {ticks:?}");
    make_axes_symmetric_zero_centered(&mut axes[2 ..], Dim::Y, Some(1.))?;
    plotter.identify_axes(36.)?;
    plotter.savefig("demos/align_axes.png")?;
    Ok(())
}
