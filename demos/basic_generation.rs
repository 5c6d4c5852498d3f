use std::error::Error;

use qrtint::{Color, CornerStyle, Protocol, QrSession, DEFAULT_CORNER_RADIUS};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut session = QrSession::default();
    session.set_protocol(Protocol::Https);
    session.set_foreground(Color::PURPLE);             // Dark modules
    session.set_background(Color::new(255, 250, 240)); // Light modules
    session.set_corner_style(CornerStyle::Rounded);    // Only affects the display image

    let img = session.set_input("github.com").ok_or("nothing to encode")?;

    // Stored form is always square
    img.raster().save("qr.png")?;
    // Display form has transparent rounded corners
    img.to_display(DEFAULT_CORNER_RADIUS).save("qr_display.png")?;

    println!("Payload: {}", session.payload().unwrap_or_default());
    println!("QR saved to: qr.png and qr_display.png");

    let shuffled = session.shuffle_colors().ok_or("nothing to encode")?;
    shuffled.raster().save("qr_shuffled.png")?;
    println!(
        "Shuffled colors {} on {} saved to: qr_shuffled.png",
        session.foreground(),
        session.background()
    );

    Ok(())
}
