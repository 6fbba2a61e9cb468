//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - streaming quantum circuit canvas",
        style("qcanvas").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qcanvas-scene      Layered scene graph and SVG painter");
    println!("  qcanvas-render     Circuit renderer and progress overlay");
    println!("  qcanvas-stream     Server-sent event consumer");
    println!("  qcanvas-dashboard  Demo stream and render server");
    println!("  qcanvas-cli        Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
