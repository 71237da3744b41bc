use ratatui::style::Color;
use swipetodo::utils::color::{mix, parse_hex};

#[test]
fn test_parse_hex() {
    assert_eq!(parse_hex("#3b82f6"), Some(Color::Rgb(59, 130, 246)));
    assert_eq!(parse_hex("FFFFFF"), Some(Color::Rgb(255, 255, 255)));
    assert_eq!(parse_hex("#fff"), None);
    assert_eq!(parse_hex("#gg0000"), None);
}

#[test]
fn test_mix_rgb_endpoints_and_midpoint() {
    let black = Color::Rgb(0, 0, 0);
    let white = Color::Rgb(255, 255, 255);
    assert_eq!(mix(black, white, 0.0), black);
    assert_eq!(mix(black, white, 1.0), white);
    assert_eq!(mix(black, white, 0.5), Color::Rgb(128, 128, 128));
    // Progress outside [0, 1] is clamped
    assert_eq!(mix(black, white, 2.0), white);
}

#[test]
fn test_mix_named_colors_switches_halfway() {
    assert_eq!(mix(Color::Red, Color::Blue, 0.4), Color::Red);
    assert_eq!(mix(Color::Red, Color::Blue, 0.5), Color::Blue);
}
