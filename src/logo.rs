//! The logo renderer: builds the display list, rasterizes it, writes the PNG.

use log::info;

use crate::fonts::{load_font_or, FontHandle, FontLocator, SystemFontLocator, TextBounds};
use crate::rendering::layout::{beside_nucleus, centered_origin};
use crate::rendering::paint::PaintCommand;
use crate::rendering::raster::{encode_png, rasterize};
use crate::rendering::{Canvas, EncodedImage};
use crate::{LogoConfig, Result};

/// Where a text run ended up and with which kind of font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPlacement {
    pub origin: (i32, i32),
    pub bounds: TextBounds,
    pub fallback: bool,
}

/// Paint commands in draw order, plus the resolved text layout.
#[derive(Debug, Clone)]
pub struct DisplayList {
    pub commands: Vec<PaintCommand>,
    pub wordmark: TextPlacement,
    pub trademark: TextPlacement,
}

pub struct LogoRenderer {
    config: LogoConfig,
    locator: Box<dyn FontLocator>,
}

impl LogoRenderer {
    /// Renderer that looks fonts up in the system font directories.
    pub fn new(config: LogoConfig) -> Self {
        Self::with_locator(config, SystemFontLocator::new())
    }

    pub fn with_locator(config: LogoConfig, locator: impl FontLocator + 'static) -> Self {
        Self { config, locator: Box::new(locator) }
    }

    pub fn config(&self) -> &LogoConfig {
        &self.config
    }

    /// Acquire fonts, lay out the text and emit paint commands in order:
    /// arcs, nucleus, wordmark, trademark.
    pub fn display_list(&self) -> Result<DisplayList> {
        let cfg = &self.config;
        let mut commands = Vec::with_capacity(cfg.arcs.len() + 3);

        for arc in &cfg.arcs {
            commands.push(PaintCommand::Arc {
                bbox: arc.bbox,
                start: arc.start,
                end: arc.end,
                width: arc.width,
                color: cfg.blue,
            });
        }
        commands.push(PaintCommand::Ellipse { bbox: cfg.nucleus.bbox(), fill: cfg.orange });

        let font = load_font_or(&*self.locator, &cfg.font_name, cfg.wordmark_size, FontHandle::fallback)?;
        let bounds = font.text_bounds(&cfg.wordmark);
        let wordmark = TextPlacement {
            origin: centered_origin(cfg.size, &bounds, cfg.wordmark_offset_y),
            bounds,
            fallback: font.is_fallback(),
        };
        info!(
            "wordmark {:?}: {}x{} at {:?}",
            cfg.wordmark,
            bounds.width(),
            bounds.height(),
            wordmark.origin
        );

        // The small size falls back to the wordmark font, whatever it turned out to be.
        let small = load_font_or(&*self.locator, &cfg.font_name, cfg.trademark_size, || font.clone())?;
        let bounds = small.text_bounds(&cfg.trademark);
        let trademark = TextPlacement {
            origin: beside_nucleus(&cfg.nucleus, cfg.trademark_gap),
            bounds,
            fallback: small.is_fallback(),
        };
        info!(
            "trademark {:?}: {}x{} at {:?}",
            cfg.trademark,
            bounds.width(),
            bounds.height(),
            trademark.origin
        );

        commands.push(PaintCommand::Text {
            origin: wordmark.origin,
            text: cfg.wordmark.clone(),
            font,
            color: cfg.blue,
        });
        commands.push(PaintCommand::Text {
            origin: trademark.origin,
            text: cfg.trademark.clone(),
            font: small,
            color: cfg.blue,
        });

        Ok(DisplayList { commands, wordmark, trademark })
    }

    pub fn render_canvas(&self) -> Result<Canvas> {
        let list = self.display_list()?;
        rasterize(self.config.size, self.config.size, &list.commands)
    }

    /// Render and encode, without touching the filesystem.
    pub fn render(&self) -> Result<EncodedImage> {
        encode_png(&self.render_canvas()?)
    }

    /// Render and write to the configured output path.
    pub fn generate(&self) -> Result<EncodedImage> {
        let image = self.render()?;
        image.write_to(&self.config.output_path)?;
        info!(
            "wrote {} ({}x{}, sha256 {})",
            self.config.output_path.display(),
            image.width,
            image.height,
            image.fingerprint()
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::fonts::DirFontLocator;

    fn offline() -> LogoRenderer {
        LogoRenderer::with_locator(LogoConfig::default(), DirFontLocator::empty())
    }

    fn test_font() -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSansMono.ttf"))
    }

    /// Finds the font once, then behaves as if it vanished.
    struct FirstCallOnly {
        path: PathBuf,
        used: AtomicBool,
    }

    impl FontLocator for FirstCallOnly {
        fn locate(&self, _name: &str) -> Option<PathBuf> {
            (!self.used.swap(true, Ordering::SeqCst)).then(|| self.path.clone())
        }
    }

    /// Finds the font only from the second call on.
    struct AfterFirstCall {
        path: PathBuf,
        used: AtomicBool,
    }

    impl FontLocator for AfterFirstCall {
        fn locate(&self, _name: &str) -> Option<PathBuf> {
            self.used.swap(true, Ordering::SeqCst).then(|| self.path.clone())
        }
    }

    #[test]
    fn display_list_order() {
        let list = offline().display_list().unwrap();
        let kinds: Vec<_> = list.commands.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, ["arc", "arc", "arc", "ellipse", "text", "text"]);
    }

    #[test]
    fn fallback_wordmark_is_centered() {
        let list = offline().display_list().unwrap();
        let w = list.wordmark;
        assert!(w.fallback);
        let (bw, bh) = (w.bounds.width(), w.bounds.height());
        assert_eq!(w.origin, ((500 - bw).div_euclid(2), (500 - bh).div_euclid(2) + 20));
    }

    #[test]
    fn trademark_position_ignores_fonts() {
        let list = offline().display_list().unwrap();
        assert_eq!(list.trademark.origin, (383, 72));
        assert!(list.trademark.fallback);
        assert!(list.trademark.bounds.width() > 0);
    }

    #[test]
    fn trademark_reuses_wordmark_font_when_small_size_is_missing() {
        let locator = FirstCallOnly { path: test_font(), used: AtomicBool::new(false) };
        let list = LogoRenderer::with_locator(LogoConfig::default(), locator).display_list().unwrap();

        assert!(!list.wordmark.fallback);
        assert!(!list.trademark.fallback);
        match list.commands.last() {
            Some(PaintCommand::Text { text, font: FontHandle::Scalable { size, .. }, .. }) => {
                assert_eq!(text, "\u{00AE}");
                assert_eq!(*size, 140.0);
            }
            other => panic!("expected scalable trademark text, got {:?}", other),
        }
    }

    #[test]
    fn trademark_uses_small_size_when_it_loads() {
        let locator = AfterFirstCall { path: test_font(), used: AtomicBool::new(false) };
        let list = LogoRenderer::with_locator(LogoConfig::default(), locator).display_list().unwrap();

        assert!(list.wordmark.fallback);
        assert!(!list.trademark.fallback);
        assert_eq!(list.trademark.origin, (383, 72));
        assert!(matches!(
            list.commands.last(),
            Some(PaintCommand::Text { font: FontHandle::Scalable { size, .. }, .. }) if *size == 60.0
        ));
    }

    #[test]
    fn scalable_wordmark_is_centered_on_its_ink() {
        let config = LogoConfig { font_name: "DejaVuSansMono.ttf".to_string(), ..LogoConfig::default() };
        let locator = DirFontLocator::new([concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts")]);
        let list = LogoRenderer::with_locator(config, locator).display_list().unwrap();

        let w = list.wordmark;
        assert!(!w.fallback);
        assert!(w.bounds.height() > 60, "height {}", w.bounds.height());
        assert_eq!(w.origin, ((500 - w.bounds.width()).div_euclid(2), (500 - w.bounds.height()).div_euclid(2) + 20));
    }

    #[test]
    fn canvas_is_square() {
        let c = offline().render_canvas().unwrap();
        assert_eq!((c.width(), c.height()), (500, 500));
    }
}
