use blazecss_lib::properties::{self, MARGIN};
use blazecss_lib::style::builder::value;
use blazecss_lib::{attr, FormatOptions, Numeric, Selector, Style, Stylesheet, ValuedStyle};

#[cfg(test)]
pub mod tests {
    use super::*;
    use lightningcss::stylesheet::{ParserOptions, StyleSheet};
    use pretty_assertions::assert_eq;
    use rayon::prelude::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Generated text must be accepted by a real CSS parser.
    fn assert_parses(css: &str) {
        if let Err(err) = StyleSheet::parse(css, ParserOptions::default()) {
            panic!("generated css does not parse: {}\n{}", err, css);
        }
    }

    fn navigation() -> Style {
        let icon = Style::new("icon", || value("width", Numeric::em(1.0)));
        Style::new("nav", move || {
            properties::display("flex")?;
            MARGIN.all(Numeric::px(0.0))?;
            MARGIN.compact()?;

            let icon = icon.clone();
            Selector::new().hover().declare(move || {
                properties::color("blue")?;
                Selector::new()
                    .descendant()
                    .with(&icon)
                    .declare(|| properties::width(Numeric::percent(100.0) - Numeric::px(4.0)))
            })?;
            Selector::new()
                .child()
                .attribute(attr("aria-current").is("page").ignore_case())
                .declare(|| properties::background_color("#eee"))?;
            Selector::new().prev().checked().declare(|| properties::rotate(450.0))
        })
    }

    #[test]
    fn test_golden_pretty_output() {
        init_logging();
        let css = Stylesheet::new().add(&navigation()).to_css().unwrap();
        let expected = r#".nav {
  display: flex;
  margin: 0 0 0 0;
}

.nav:hover {
  color: blue;
}

.nav:hover .icon {
  width: -webkit-calc(100% - 4px);
  width: calc(100% - 4px);
}

.nav>*[aria-current="page" i] {
  background-color: #eee;
}

*:checked+.nav {
  transform: rotate(90deg);
}
"#;
        assert_eq!(css, expected);
        assert_parses(&css);
    }

    #[test]
    fn test_golden_compact_output() {
        init_logging();
        let css = Stylesheet::new()
            .add(&navigation())
            .to_css_with(FormatOptions {
                minify: true,
                ..FormatOptions::default()
            })
            .unwrap();
        assert_eq!(
            css,
            ".nav{display:flex;margin:0 0 0 0}.nav:hover{color:blue}\
             .nav:hover .icon{width:-webkit-calc(100% - 4px);width:calc(100% - 4px)}\
             .nav>*[aria-current=\"page\" i]{background-color:#eee}\
             *:checked+.nav{transform:rotate(90deg)}"
        );
        assert_parses(&css);
    }

    #[test]
    fn test_nested_style_merges_into_parent_block() {
        init_logging();
        let base = Style::new("base", || {
            properties::color("black")?;
            value("line-height", Numeric::number(1.5))
        });
        let heading = Style::raw("h1", move || {
            properties::color("red")?;
            base.apply()
        });
        let css = Stylesheet::new().add(&heading).to_css().unwrap();
        assert_eq!(css, "h1 {\n  color: black;\n  line-height: 1.5;\n}\n");
    }

    #[test]
    fn test_root_styles_keep_order_and_deduplicate() {
        init_logging();
        let buttons: ValuedStyle<&'static str> =
            ValuedStyle::new("button", |color: &&'static str| properties::color(*color));
        let mut sheet = Stylesheet::new();
        for color in ["red", "blue", "red", "green", "blue"] {
            sheet.add(&buttons.of(color).unwrap());
        }
        assert_eq!(sheet.len(), 3);
        let css = sheet.to_css().unwrap();
        assert_eq!(
            css,
            ".button-0 {\n  color: red;\n}\n\n.button-1 {\n  color: blue;\n}\n\n.button-2 {\n  color: green;\n}\n"
        );
        assert_parses(&css);
    }

    #[test]
    fn test_cache_is_shared_across_threads() {
        init_logging();
        let spacing: ValuedStyle<u32> = ValuedStyle::new("gap", |size: &u32| {
            value("gap", Numeric::px(f64::from(*size)))
        });
        let styles: Vec<(u32, Style)> = (0..2_000u32)
            .into_par_iter()
            .map(|i| (i % 16, spacing.of(i % 16).unwrap()))
            .collect();
        assert_eq!(spacing.len(), 16);
        for (key, style) in &styles {
            let first = styles.iter().find(|(other, _)| other == key).unwrap();
            assert!(first.1.ptr_eq(style));
        }
    }

    #[test]
    fn test_independent_sheets_build_in_parallel() {
        init_logging();
        let outputs: Vec<String> = (0..64)
            .into_par_iter()
            .map(|i| {
                let style = Style::new("cell", move || {
                    value("order", Numeric::number(f64::from(i)))?;
                    Selector::new().hover().declare(move || value("z-index", Numeric::number(f64::from(i))))
                });
                Stylesheet::new().add(&style).to_css().unwrap()
            })
            .collect();
        for (i, css) in outputs.iter().enumerate() {
            assert_eq!(
                css,
                &format!(".cell {{\n  order: {i};\n}}\n\n.cell:hover {{\n  z-index: {i};\n}}\n")
            );
        }
    }
}
