use macroquad::color::Color;

/// A random, fully opaque colour for a new figure.
pub fn random_color() -> Color {
    use random_color::RandomColor;

    let [r, g, b, _] = RandomColor::new().to_f32_rgba_array();
    Color::new(r, g, b, 1.0)
}

/// Black or white, whichever reads better on top of `background`.
pub fn contrasting(background: Color) -> Color {
    let luma = 0.299 * background.r + 0.587 * background.g + 0.114 * background.b;
    if luma > 0.5 { Color::new(0.0, 0.0, 0.0, 1.0) } else { Color::new(1.0, 1.0, 1.0, 1.0) }
}
