#[macro_use]
mod macros;

fn compressed() -> slate::Options<'static> {
    slate::Options::default().style(slate::OutputStyle::Compressed)
}

test!(preserves_hex_case, "#ABC", "#ABC");
test!(preserves_long_hex, "#aabbcc", "#aabbcc");
test!(preserves_keyword, "red", "red");
test!(transparent_keyword, "transparent", "transparent");
test!(compressed_shortens_hex, "#ffffff", "#fff", compressed());
test!(compressed_prefers_shorter_name, "#ff0000", "red", compressed());
test!(compressed_prefers_shorter_hex, "yellow", "#ff0", compressed());
test!(compressed_keeps_unshortenable_hex, "#abcdef", "#abcdef", compressed());
test!(
    compressed_translucent,
    "rgba(0, 0, 0, 0.5)",
    "rgba(0,0,0,0.5)",
    compressed()
);

test!(add_colors, "#ff0000 + #0000ff", "fuchsia");
test!(multiply_by_number, "#010203 * 2", "#020406");
test!(subtract_number, "#fff - 1", "#fefefe");
test!(divide_by_number, "(#808080 / 2)", "#404040");
test!(slash_after_color_is_kept, "#808080 / 2", "#808080 / 2");
test!(channels_clamp, "#000 + 300", "white");
test!(color_plus_string_concatenates, "red + foo", "redfoo");
error!(
    color_plus_unit,
    "#abc + 1px", "Error: Expected unitless number, got 1px."
);
error!(
    alpha_must_match,
    "rgba(0, 0, 0, 0.5) + #000",
    "Error: Alpha channels must match between rgba(0, 0, 0, 0.5) and #000."
);
test!(colors_compare_by_channels, "#f00 == red", "true");
test!(colors_compare_by_alpha, "#000 == rgba(0, 0, 0, 0.5)", "false");

test!(rgb_is_named, "rgb(255, 0, 0)", "red");
test!(rgb_percentages, "rgb(100%, 0%, 0%)", "red");
test!(rgb_channels_clamp, "rgb(300, 0, -10)", "red");
test!(rgb_computed_hex, "rgb(18, 52, 86)", "#123456");
test!(rgba_translucent, "rgba(255, 0, 0, 0.5)", "rgba(255, 0, 0, 0.5)");
test!(rgba_alpha_two_digits, "rgba(0, 0, 0, 0.333)", "rgba(0, 0, 0, 0.33)");
test!(rgba_zero_alpha, "rgba(0, 0, 0, 0)", "transparent");
test!(rgba_opaque, "rgba(0, 0, 255, 1)", "blue");
test!(rgba_of_color, "rgba(#abc, 0.5)", "rgba(170, 187, 204, 0.5)");
test!(rgba_of_color_alone, "rgba(#abc)", "#abc");
test!(rgb_of_color_drops_literal, "rgb(#AABBCC)", "#abc");
error!(
    rgb_rejects_units,
    "rgb(10px, 0, 0)", "Error: $red: Expected 10px to have no units or \"%\"."
);
error!(
    rgba_rejects_non_color,
    "rgba(a, 0.5)", "Error: $color: a is not a color."
);

test!(hsl_is_named, "hsl(0, 100%, 50%)", "red");
test!(hsl_degrees, "hsl(120deg, 100%, 25%)", "green");
test!(hsl_wraps_hue, "hsl(360, 100%, 50%)", "red");
test!(
    hsla_keeps_notation,
    "hsla(120, 100%, 50%, 0.5)",
    "hsla(120, 100%, 50%, 0.5)"
);
test!(
    hsla_compressed_uses_rgba,
    "hsla(120, 100%, 50%, 0.5)",
    "rgba(0,255,0,0.5)",
    compressed()
);

test!(red_channel, "red(#abc)", "170");
test!(green_channel, "green(#abc)", "187");
test!(blue_channel, "blue(#abc)", "204");
test!(alpha_of_opaque, "alpha(#abc)", "1");
test!(opacity_of_translucent, "opacity(rgba(0, 0, 0, 0.3))", "0.3");
test!(hue_of_red, "hue(#f00)", "0deg");
test!(hue_of_blue, "hue(#00f)", "240deg");
test!(saturation_of_red, "saturation(#f00)", "100%");
test!(lightness_of_red, "lightness(#f00)", "50%");
error!(red_of_number, "red(1px)", "Error: $color: 1px is not a color.");

test!(lighten_percent, "lighten(#800000, 20%)", "#e60000");
test!(lighten_unitless, "lighten(#800000, 20)", "#e60000");
test!(adjust_lightness_alias, "adjust-lightness(#800000, 20%)", "#e60000");
test!(darken, "darken(#fff, 10%)", "#e6e6e6");
test!(darken_clamps, "darken(#800000, 100%)", "black");
test!(desaturate_fully, "desaturate(#f00, 100%)", "gray");
test!(saturate_clamps, "saturate(#f00, 50%)", "red");
test!(grayscale, "grayscale(#f00)", "gray");
test!(greyscale_alias, "greyscale(#f00)", "gray");
test!(adjust_hue, "adjust-hue(#f00, 120deg)", "lime");
test!(spin_backwards, "spin(#f00, -120)", "blue");
test!(complement, "complement(#f00)", "aqua");
test!(invert, "invert(#000)", "white");
test!(mix_evenly, "mix(#f00, #00f)", "purple");
test!(mix_weighted, "mix(#f00, #00f, 25%)", "#4000bf");
test!(mix_unitless_weight, "mix(#f00, #00f, 0.25)", "#4000bf");
test!(scale_lightness, "scale-lightness(#000, 50%)", "gray");
test!(
    grayscale_equals_rounded_gray,
    "grayscale(#f00) == rgb(127.5, 127.5, 127.5)",
    "true"
);

test!(opacify, "opacify(rgba(0, 0, 0, 0.5), 0.25)", "rgba(0, 0, 0, 0.75)");
test!(fade_in_percent, "fade-in(rgba(0, 0, 0, 0.5), 50%)", "black");
test!(transparentize, "transparentize(#000, 0.3)", "rgba(0, 0, 0, 0.7)");
test!(fadeout_alias, "fadeout(#000, 30%)", "rgba(0, 0, 0, 0.7)");

test!(filter_grayscale, "grayscale(1)", "grayscale(1)");
test!(filter_invert, "invert(10%)", "invert(10%)");
test!(filter_opacity, "opacity(50%)", "opacity(50%)");
test!(filter_saturate, "saturate(50%)", "saturate(50%)");

test!(adjust_color_rgb, "adjust-color(#000, $red: 255)", "red");
test!(adjust_color_hue, "adjust-color(#f00, $hue: 120)", "lime");
test!(
    adjust_color_alpha,
    "adjust-color(rgba(0, 0, 0, 0.5), $alpha: -0.25)",
    "rgba(0, 0, 0, 0.25)"
);
test!(scale_color_lightness, "scale-color(#000, $lightness: 50%)", "gray");
test!(scale_color_red, "scale-color(#800000, $red: 100%)", "red");
test!(change_color_blue, "change-color(#f00, $blue: 255)", "fuchsia");
test!(
    change_color_alpha,
    "change-color(#f00, $alpha: 0.5)",
    "rgba(255, 0, 0, 0.5)"
);
error!(
    adjust_color_two_positional,
    "adjust-color(#000, 1, 2)",
    "Error: Only one positional argument is allowed. All other arguments must be passed by name."
);
error!(
    adjust_color_unknown_channel,
    "adjust-color(#000, $foo: 1)", "Error: No argument named $foo."
);
error!(
    scale_color_has_no_hue,
    "scale-color(#000, $hue: 10%)", "Error: No argument named $hue."
);
error!(
    scale_color_out_of_range,
    "scale-color(#000, $red: 150%)",
    "Error: $red: Expected 150% to be within -100% and 100%."
);

test!(ie_hex_str_opaque, "ie-hex-str(#abc)", "#FFAABBCC");
test!(
    ie_hex_str_translucent,
    "ie-hex-str(rgba(255, 0, 0, 0.5))",
    "#80FF0000"
);

#[test]
fn rendered_colors_parse_back() {
    for (source, options) in [
        ("rgb(18, 52, 86)", slate::Options::default()),
        ("rgba(18, 52, 86, 0.5)", slate::Options::default()),
        ("rgb(255, 255, 0)", compressed()),
    ] {
        let css = slate::evaluate(source, &options).unwrap();
        let equal = slate::evaluate(&format!("{} == {}", css, source), &options).unwrap();
        assert_eq!(equal, "true", "{} rendered as {}", source, css);
    }
}
