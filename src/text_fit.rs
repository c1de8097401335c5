//! Fitting captions into a widget: shrink the font, wrap words, or cut the
//! text with an ellipsis.
//!
//! Measurement comes from a [`TextMeasure`] oracle so the engine never
//! depends on a particular text backend. A width the oracle cannot report
//! (NaN, infinite, negative) counts as "does not fit", which pushes the
//! result toward the smallest font and the shortest prefix instead of
//! failing.

use floem::kurbo::Size;

use crate::constants;
use crate::error::ConfigError;

/// Extent of a run of text at some font size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl TextExtent {
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Text measurement oracle.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f64) -> TextExtent;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f64) -> TextExtent,
{
    fn measure(&self, text: &str, font_size: f64) -> TextExtent {
        self(text, font_size)
    }
}

/// How a caption reacts to its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelLayout {
    /// Shrink the font until the caption fits on one line.
    #[default]
    AutoFitCaption,
    /// Shrink the font until the word-wrapped caption fits the bounds.
    AutoFitCaptionPlusWordWrap,
    /// Keep the font, report the size the control needs.
    AutoSizeControl,
    /// Keep the font, wrap to the bounds width, report the height needed.
    AutoSizeControlPlusWordWrap,
}

impl LabelLayout {
    pub fn wraps(self) -> bool {
        matches!(
            self,
            LabelLayout::AutoFitCaptionPlusWordWrap | LabelLayout::AutoSizeControlPlusWordWrap
        )
    }

    pub fn auto_sizes(self) -> bool {
        matches!(
            self,
            LabelLayout::AutoSizeControl | LabelLayout::AutoSizeControlPlusWordWrap
        )
    }
}

/// Shrink limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFitConfig {
    min_font_size: f64,
    font_step: f64,
    ellipsis: &'static str,
}

impl Default for TextFitConfig {
    fn default() -> Self {
        Self::label()
    }
}

impl TextFitConfig {
    /// Labels and hyperlinks shrink to 6.
    pub fn label() -> Self {
        Self {
            min_font_size: constants::LABEL_MIN_FONT,
            font_step: constants::FONT_STEP,
            ellipsis: constants::ELLIPSIS,
        }
    }

    /// Checkbox and radio captions stop at 7.
    pub fn toggle() -> Self {
        Self {
            min_font_size: constants::TOGGLE_MIN_FONT,
            ..Self::label()
        }
    }

    pub fn new(min_font_size: f64) -> Result<Self, ConfigError> {
        Self::label().with_min_font_size(min_font_size)
    }

    pub fn with_min_font_size(mut self, size: f64) -> Result<Self, ConfigError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ConfigError::MinFontSize(size));
        }
        self.min_font_size = size;
        Ok(self)
    }

    pub fn with_font_step(mut self, step: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::FontStep(step));
        }
        self.font_step = step;
        Ok(self)
    }

    pub fn with_ellipsis(mut self, ellipsis: &'static str) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    pub fn min_font_size(&self) -> f64 {
        self.min_font_size
    }

    pub fn font_step(&self) -> f64 {
        self.font_step
    }

    pub fn ellipsis(&self) -> &'static str {
        self.ellipsis
    }
}

/// What a widget should draw for its caption.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextFitResult {
    pub font_size: f64,
    /// One entry per drawn line; single-line layouts have at most one.
    pub lines: Vec<String>,
    /// The caption did not fit even at the minimum size and was cut.
    pub fit_failed: bool,
    /// Size the control asks for, for auto-sizing layouts.
    pub requested_size: Option<Size>,
}

impl TextFitResult {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

fn fits(width: f64, available: f64) -> bool {
    width.is_finite() && width >= 0.0 && width <= available
}

fn measured_width<M: TextMeasure + ?Sized>(measure: &M, text: &str, font_size: f64) -> f64 {
    let width = measure.measure(text, font_size).width;
    if !width.is_finite() || width < 0.0 {
        log::debug!("text measure returned {width} for {text:?} at {font_size}");
    }
    width
}

fn line_height<M: TextMeasure + ?Sized>(measure: &M, text: &str, font_size: f64) -> f64 {
    let h = measure.measure(text, font_size).height();
    let h = if h.is_finite() && h > 0.0 { h } else { font_size };
    h * constants::LINE_SPACING
}

/// Step the font down from `preferred` until `caption` fits `available`
/// or the floor is reached. Returns the size and whether fitting failed.
pub fn shrink_to_fit<M: TextMeasure + ?Sized>(
    caption: &str,
    preferred: f64,
    available: f64,
    measure: &M,
    config: &TextFitConfig,
) -> (f64, bool) {
    let floor = config.min_font_size;
    let mut size = if preferred.is_finite() { preferred } else { floor };
    loop {
        if fits(measured_width(measure, caption, size), available) {
            return (size, false);
        }
        if size <= floor {
            return (size, true);
        }
        size = (size - config.font_step).max(floor);
    }
}

/// Longest char prefix of `caption` that still fits with `ellipsis`
/// appended. Returns the caption untouched when it already fits, and the
/// ellipsis alone when no prefix does.
pub fn truncate_with_ellipsis<M: TextMeasure + ?Sized>(
    caption: &str,
    available: f64,
    font_size: f64,
    measure: &M,
    ellipsis: &str,
) -> String {
    if fits(measured_width(measure, caption, font_size), available) {
        return caption.to_string();
    }
    let bounds: Vec<usize> = caption
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(caption.len()))
        .collect();
    let candidate = |chars: usize| format!("{}{}", &caption[..bounds[chars]], ellipsis);

    // Width is non-decreasing in prefix length, so the fitting prefixes
    // form a run starting at 0.
    let (mut lo, mut hi) = (0usize, bounds.len() - 1);
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        if fits(measured_width(measure, &candidate(mid), font_size), available) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    candidate(lo)
}

/// Greedy word wrap. A word wider than the line still gets its own line.
pub fn wrap_words<M: TextMeasure + ?Sized>(
    caption: &str,
    available: f64,
    font_size: f64,
    measure: &M,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in caption.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if fits(measured_width(measure, &candidate, font_size), available) {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out `caption` in `bounds` according to `layout`.
pub fn fit_text<M: TextMeasure + ?Sized>(
    caption: &str,
    preferred: f64,
    bounds: Size,
    layout: LabelLayout,
    measure: &M,
    config: &TextFitConfig,
) -> TextFitResult {
    let pad = constants::AUTOSIZE_PADDING;
    if caption.trim().is_empty() {
        return TextFitResult {
            font_size: preferred,
            lines: Vec::new(),
            fit_failed: false,
            requested_size: layout.auto_sizes().then(|| Size::new(pad, pad)),
        };
    }

    let result = match layout {
        LabelLayout::AutoFitCaption => {
            let (font_size, fit_failed) =
                shrink_to_fit(caption, preferred, bounds.width, measure, config);
            let line = if fit_failed {
                truncate_with_ellipsis(caption, bounds.width, font_size, measure, config.ellipsis)
            } else {
                caption.to_string()
            };
            TextFitResult {
                font_size,
                lines: vec![line],
                fit_failed,
                requested_size: None,
            }
        }
        LabelLayout::AutoFitCaptionPlusWordWrap => {
            fit_wrapped(caption, preferred, bounds, measure, config)
        }
        LabelLayout::AutoSizeControl => {
            let extent = measure.measure(caption, preferred);
            TextFitResult {
                font_size: preferred,
                lines: vec![caption.to_string()],
                fit_failed: false,
                requested_size: Some(Size::new(
                    sanitize(extent.width) + pad,
                    sanitize(extent.height()) + pad,
                )),
            }
        }
        LabelLayout::AutoSizeControlPlusWordWrap => {
            let lines = wrap_words(caption, bounds.width, preferred, measure);
            let widest = lines
                .iter()
                .map(|l| sanitize(measured_width(measure, l, preferred)))
                .fold(0.0, f64::max);
            let height = lines.len() as f64 * line_height(measure, caption, preferred);
            TextFitResult {
                font_size: preferred,
                lines,
                fit_failed: false,
                requested_size: Some(Size::new(widest + pad, height + pad)),
            }
        }
    };
    if result.fit_failed {
        log::debug!(
            "caption {caption:?} does not fit {:?} at {}; truncated",
            bounds,
            result.font_size
        );
    }
    result
}

fn sanitize(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

fn fit_wrapped<M: TextMeasure + ?Sized>(
    caption: &str,
    preferred: f64,
    bounds: Size,
    measure: &M,
    config: &TextFitConfig,
) -> TextFitResult {
    let floor = config.min_font_size;
    let mut size = if preferred.is_finite() { preferred } else { floor };
    loop {
        let lines = wrap_words(caption, bounds.width, size, measure);
        let lh = line_height(measure, caption, size);
        let block_fits = lines.len() as f64 * lh <= bounds.height
            && lines
                .iter()
                .all(|l| fits(measured_width(measure, l, size), bounds.width));
        if block_fits {
            return TextFitResult {
                font_size: size,
                lines,
                fit_failed: false,
                requested_size: None,
            };
        }
        if size <= floor {
            let lines = clip_lines(lines, bounds, lh, size, measure, config.ellipsis);
            return TextFitResult {
                font_size: size,
                lines,
                fit_failed: true,
                requested_size: None,
            };
        }
        size = (size - config.font_step).max(floor);
    }
}

/// Keep the lines that fit vertically; fold the overflow into the last kept
/// line and cut every line that is still too wide.
fn clip_lines<M: TextMeasure + ?Sized>(
    mut lines: Vec<String>,
    bounds: Size,
    line_height: f64,
    size: f64,
    measure: &M,
    ellipsis: &str,
) -> Vec<String> {
    let visible = ((bounds.height / line_height).floor() as usize).max(1);
    if lines.len() > visible {
        let overflow = lines.split_off(visible).join(" ");
        if let Some(last) = lines.last_mut() {
            last.push(' ');
            last.push_str(&overflow);
        }
    }
    lines
        .into_iter()
        .map(|line| truncate_with_ellipsis(&line, bounds.width, size, measure, ellipsis))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct FitKey {
    caption: String,
    font_size: f64,
    bounds: Size,
}

/// Cached caption layout for one widget. `update` only re-runs the fit when
/// caption, font size, bounds or layout changed since the last call.
#[derive(Debug, Clone, Default)]
pub struct CaptionLayout {
    layout: LabelLayout,
    config: TextFitConfig,
    key: Option<FitKey>,
    result: TextFitResult,
    line_extent: TextExtent,
}

impl CaptionLayout {
    pub fn new(layout: LabelLayout, config: TextFitConfig) -> Self {
        Self {
            layout,
            config,
            key: None,
            result: TextFitResult::default(),
            line_extent: TextExtent::default(),
        }
    }

    pub fn layout(&self) -> LabelLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: LabelLayout) {
        if layout != self.layout {
            self.layout = layout;
            self.key = None;
        }
    }

    pub fn set_config(&mut self, config: TextFitConfig) {
        if config != self.config {
            self.config = config;
            self.key = None;
        }
    }

    /// Drop the cached result, e.g. after a font or density change the
    /// key does not capture.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Last computed result.
    pub fn result(&self) -> &TextFitResult {
        &self.result
    }

    /// Extent of the whole caption at the fitted font size, measured with
    /// the last fit. Painting reads this instead of measuring again.
    pub fn line_extent(&self) -> TextExtent {
        self.line_extent
    }

    pub fn update<M: TextMeasure + ?Sized>(
        &mut self,
        caption: &str,
        font_size: f64,
        bounds: Size,
        measure: &M,
    ) -> &TextFitResult {
        let key = FitKey {
            caption: caption.to_string(),
            font_size,
            bounds,
        };
        if self.key.as_ref() != Some(&key) {
            self.result = fit_text(caption, font_size, bounds, self.layout, measure, &self.config);
            self.line_extent = measure.measure(caption, self.result.font_size);
            self.key = Some(key);
        }
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Every char advances `0.6 × size`; ascent 0.8, descent 0.2.
    struct FixedAdvance;

    impl TextMeasure for FixedAdvance {
        fn measure(&self, text: &str, font_size: f64) -> TextExtent {
            TextExtent {
                width: text.chars().count() as f64 * font_size * 0.6,
                ascent: font_size * 0.8,
                descent: font_size * 0.2,
            }
        }
    }

    struct Counting {
        calls: Cell<usize>,
    }

    impl TextMeasure for Counting {
        fn measure(&self, text: &str, font_size: f64) -> TextExtent {
            self.calls.set(self.calls.get() + 1);
            FixedAdvance.measure(text, font_size)
        }
    }

    fn width(text: &str, size: f64) -> f64 {
        FixedAdvance.measure(text, size).width
    }

    #[test]
    fn test_fits_without_shrinking() {
        let config = TextFitConfig::label();
        let (size, failed) = shrink_to_fit("Hi", 14.0, 100.0, &FixedAdvance, &config);
        assert_eq!(size, 14.0);
        assert!(!failed);
    }

    #[test]
    fn test_shrinks_to_largest_fitting_step() {
        // "Hello" is 3 × size wide; 30 px fits at 10 and below.
        let (size, failed) =
            shrink_to_fit("Hello", 14.0, 30.0, &FixedAdvance, &TextFitConfig::label());
        assert_eq!(size, 10.0);
        assert!(!failed);
        assert!(width("Hello", size + 0.5) > 30.0);
    }

    #[test]
    fn test_shrink_is_monotonic() {
        let config = TextFitConfig::label();
        for available in [5.0, 20.0, 33.0, 41.0, 60.0, 500.0] {
            let (size, failed) = shrink_to_fit("Brush", 14.0, available, &FixedAdvance, &config);
            assert!(size <= 14.0);
            assert!(size >= config.min_font_size());
            if failed {
                assert_eq!(size, config.min_font_size());
            } else {
                assert!(width("Brush", size) <= available);
            }
        }
    }

    #[test]
    fn test_floor_is_mode_dependent() {
        let floor_for = |config: TextFitConfig| {
            shrink_to_fit("Wide caption", 14.0, 1.0, &FixedAdvance, &config).0
        };
        let label = floor_for(TextFitConfig::label());
        let toggle = floor_for(TextFitConfig::toggle());
        assert_eq!(label, 6.0);
        assert_eq!(toggle, 7.0);
    }

    #[test]
    fn test_step_clamps_at_floor() {
        let config = TextFitConfig::label().with_font_step(5.0).unwrap();
        let (size, failed) = shrink_to_fit("Wide caption", 14.0, 1.0, &FixedAdvance, &config);
        assert_eq!(size, 6.0);
        assert!(failed);
    }

    #[test]
    fn test_gaussian_blur_caption() {
        let caption = "Apply Gaussian Blur Filter";
        let result = fit_text(
            caption,
            14.0,
            Size::new(80.0, 20.0),
            LabelLayout::AutoFitCaption,
            &FixedAdvance,
            &TextFitConfig::label(),
        );
        assert!(result.font_size <= 14.0);
        assert!(width(caption, 6.0) > 80.0);
        assert!(result.fit_failed);
        assert_eq!(result.font_size, 6.0);
        let line = &result.lines[0];
        assert!(line.ends_with('\u{2026}'));
        assert!(width(line, result.font_size) <= 80.0);
        assert_eq!(line, "Apply Gaussian Blur F\u{2026}");
    }

    #[test]
    fn test_truncate_returns_ellipsis_alone() {
        let out = truncate_with_ellipsis("Anything", 1.0, 10.0, &FixedAdvance, "\u{2026}");
        assert_eq!(out, "\u{2026}");
    }

    #[test]
    fn test_truncate_keeps_fitting_caption() {
        let out = truncate_with_ellipsis("Ok", 100.0, 10.0, &FixedAdvance, "\u{2026}");
        assert_eq!(out, "Ok");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let out = truncate_with_ellipsis("Übersättigung", 30.0, 10.0, &FixedAdvance, "\u{2026}");
        assert_eq!(out, "Über\u{2026}");
        assert!(width(&out, 10.0) <= 30.0);
    }

    #[test]
    fn test_broken_oracle_means_no_fit() {
        let nan = |_: &str, _: f64| TextExtent {
            width: f64::NAN,
            ascent: 1.0,
            descent: 1.0,
        };
        let result = fit_text(
            "Levels",
            12.0,
            Size::new(200.0, 40.0),
            LabelLayout::AutoFitCaption,
            &nan,
            &TextFitConfig::label(),
        );
        assert!(result.fit_failed);
        assert_eq!(result.font_size, 6.0);
        assert_eq!(result.lines, vec!["\u{2026}".to_string()]);
    }

    #[test]
    fn test_negative_width_means_no_fit() {
        let negative = |_: &str, _: f64| TextExtent {
            width: -5.0,
            ascent: 1.0,
            descent: 1.0,
        };
        let (_, failed) = shrink_to_fit("Curves", 12.0, 100.0, &negative, &TextFitConfig::label());
        assert!(failed);
    }

    #[test]
    fn test_wrap_words_greedy() {
        // 6 px per char at size 10; 60 px holds 10 chars.
        let lines = wrap_words("one two three four", 60.0, 10.0, &FixedAdvance);
        assert_eq!(lines, vec!["one two", "three four"]);
    }

    #[test]
    fn test_wrap_long_word_gets_own_line() {
        let lines = wrap_words("a extraordinarily b", 30.0, 10.0, &FixedAdvance);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn test_wrap_fit_shrinks_until_block_fits() {
        let result = fit_text(
            "one two three four",
            10.0,
            Size::new(60.0, 20.0),
            LabelLayout::AutoFitCaptionPlusWordWrap,
            &FixedAdvance,
            &TextFitConfig::label(),
        );
        assert!(!result.fit_failed);
        assert_eq!(result.font_size, 8.0);
        assert_eq!(result.lines, vec!["one two", "three four"]);
    }

    #[test]
    fn test_wrap_fit_failure_truncates_last_line() {
        let result = fit_text(
            "one two three four",
            10.0,
            Size::new(30.0, 10.0),
            LabelLayout::AutoFitCaptionPlusWordWrap,
            &FixedAdvance,
            &TextFitConfig::label(),
        );
        assert!(result.fit_failed);
        assert_eq!(result.font_size, 6.0);
        assert_eq!(result.lines, vec!["one two\u{2026}"]);
    }

    #[test]
    fn test_auto_size_reports_padded_extent() {
        let result = fit_text(
            "Hello",
            10.0,
            Size::new(1.0, 1.0),
            LabelLayout::AutoSizeControl,
            &FixedAdvance,
            &TextFitConfig::label(),
        );
        assert_eq!(result.font_size, 10.0);
        assert!(!result.fit_failed);
        assert_eq!(result.requested_size, Some(Size::new(38.0, 18.0)));
        assert_eq!(result.text(), "Hello");
    }

    #[test]
    fn test_auto_size_wrap_grows_height() {
        let result = fit_text(
            "one two three four",
            10.0,
            Size::new(60.0, 5.0),
            LabelLayout::AutoSizeControlPlusWordWrap,
            &FixedAdvance,
            &TextFitConfig::label(),
        );
        assert_eq!(result.lines.len(), 2);
        let requested = result.requested_size.unwrap();
        assert!((requested.width - 68.0).abs() < 1e-9);
        assert!((requested.height - (24.0 + 8.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_caption() {
        let result = fit_text(
            "   ",
            12.0,
            Size::new(10.0, 10.0),
            LabelLayout::AutoFitCaption,
            &FixedAdvance,
            &TextFitConfig::label(),
        );
        assert!(result.lines.is_empty());
        assert!(!result.fit_failed);
    }

    #[test]
    fn test_caption_layout_caches() {
        let counting = Counting { calls: Cell::new(0) };
        let mut layout = CaptionLayout::new(LabelLayout::AutoFitCaption, TextFitConfig::label());
        let bounds = Size::new(80.0, 20.0);
        layout.update("Apply Gaussian Blur Filter", 14.0, bounds, &counting);
        let after_first = counting.calls.get();
        assert!(after_first > 0);

        layout.update("Apply Gaussian Blur Filter", 14.0, bounds, &counting);
        assert_eq!(counting.calls.get(), after_first);

        layout.update("Apply Gaussian Blur Filter", 14.0, Size::new(400.0, 20.0), &counting);
        assert!(counting.calls.get() > after_first);
        assert!(!layout.result().fit_failed);

        let before_layout_change = counting.calls.get();
        layout.set_layout(LabelLayout::AutoSizeControl);
        layout.update("Apply Gaussian Blur Filter", 14.0, Size::new(400.0, 20.0), &counting);
        assert!(counting.calls.get() > before_layout_change);
        assert!(layout.result().requested_size.is_some());
    }

    #[test]
    fn test_caption_layout_caches_line_extent() {
        let counting = Counting { calls: Cell::new(0) };
        let mut layout = CaptionLayout::new(LabelLayout::AutoFitCaption, TextFitConfig::label());
        layout.update("Hello", 10.0, Size::new(30.0, 20.0), &counting);
        let calls = counting.calls.get();

        for _ in 0..5 {
            let extent = layout.line_extent();
            assert_eq!(extent, FixedAdvance.measure("Hello", 10.0));
        }
        layout.update("Hello", 10.0, Size::new(30.0, 20.0), &counting);
        assert_eq!(counting.calls.get(), calls);

        // A refit at a smaller size refreshes the extent.
        layout.update("Hello", 10.0, Size::new(24.0, 20.0), &counting);
        assert_eq!(layout.result().font_size, 8.0);
        assert_eq!(layout.line_extent(), FixedAdvance.measure("Hello", 8.0));
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(TextFitConfig::new(0.0), Err(ConfigError::MinFontSize(0.0)));
        assert!(TextFitConfig::label().with_font_step(-0.5).is_err());
        assert_eq!(TextFitConfig::new(9.0).unwrap().min_font_size(), 9.0);
    }
}
