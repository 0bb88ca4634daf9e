#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

// SAFETY: This application is single threaded, so using AssumeSingleThreaded is allowed.
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

use std::str::FromStr;

use js_sys::{Object, Reflect};
use mathtype::{Config, Converter, FracAlign, PartialConfig};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    // Parser diagnostics go to the browser console. A second module instance finds the logger
    // already set, which is fine.
    let _ = console_log::init_with_level(log::Level::Warn);
}

#[wasm_bindgen]
#[derive(Debug)]
pub struct ConfigParseError {
    message: &'static str,
}

#[wasm_bindgen]
impl ConfigParseError {
    #[wasm_bindgen(getter, unchecked_return_type = "string")]
    pub fn message(&self) -> JsValue {
        JsValue::from_str(self.message)
    }
}

#[wasm_bindgen(typescript_custom_section)]
const ITEXT_STYLE: &'static str = r#"
interface MathTypeOptions {
    baseFontSize?: number;
    mathFontFamily?: string;
    uiFontFamily?: string;
    scriptScale?: number;
    scriptMinSize?: number;
    fracLineThickness?: number;
    fracNumAlign?: "left" | "center" | "right" | null;
    fracDenomAlign?: "left" | "center" | "right" | null;
    matrixRowGap?: number;
    matrixColGap?: number;
    fencePadding?: number;
    operatorSpacing?: number;
    useOperatorSpacing?: boolean;
    useMunderover?: boolean;
    thinSpace?: number;
    mediumSpace?: number;
    thickSpace?: number;
    quad?: number;
    qquad?: number;
    displayMode?: boolean;
    prettyPrint?: "never" | "always" | "auto";
    annotation?: boolean;
}
"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "MathTypeOptions")]
    pub type MathTypeOptions;

    #[wasm_bindgen(method, getter = baseFontSize)]
    fn base_font_size(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = mathFontFamily)]
    fn math_font_family(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = uiFontFamily)]
    fn ui_font_family(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = scriptScale)]
    fn script_scale(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = scriptMinSize)]
    fn script_min_size(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = fracLineThickness)]
    fn frac_line_thickness(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = fracNumAlign)]
    fn frac_num_align(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = fracDenomAlign)]
    fn frac_denom_align(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = matrixRowGap)]
    fn matrix_row_gap(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = matrixColGap)]
    fn matrix_col_gap(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = fencePadding)]
    fn fence_padding(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = operatorSpacing)]
    fn operator_spacing(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = useOperatorSpacing)]
    fn use_operator_spacing(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = useMunderover)]
    fn use_munderover(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = thinSpace)]
    fn thin_space(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = mediumSpace)]
    fn medium_space(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = thickSpace)]
    fn thick_space(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter)]
    fn quad(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter)]
    fn qquad(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = displayMode)]
    fn display_mode(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter = prettyPrint)]
    fn pretty_print(this: &MathTypeOptions) -> JsValue;
    #[wasm_bindgen(method, getter)]
    fn annotation(this: &MathTypeOptions) -> JsValue;
}

fn is_unset(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn number(value: JsValue, message: &'static str) -> Result<Option<f64>, ConfigParseError> {
    if is_unset(&value) {
        return Ok(None);
    }
    match value.as_f64() {
        Some(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(ConfigParseError { message }),
    }
}

fn boolean(value: JsValue, message: &'static str) -> Result<Option<bool>, ConfigParseError> {
    if is_unset(&value) {
        return Ok(None);
    }
    value.as_bool().map(Some).ok_or(ConfigParseError { message })
}

fn string(value: JsValue, message: &'static str) -> Result<Option<String>, ConfigParseError> {
    if is_unset(&value) {
        return Ok(None);
    }
    value.as_string().map(Some).ok_or(ConfigParseError { message })
}

/// Parses one of the keyword values of a `strum` enum.
fn keyword<T: FromStr>(
    value: Option<String>,
    message: &'static str,
) -> Result<Option<T>, ConfigParseError> {
    value
        .map(|s| T::from_str(&s).map_err(|_| ConfigParseError { message }))
        .transpose()
}

/// Alignments can be cleared with `null`, unlike the other keys, where `null` means "not set".
fn alignment(
    value: JsValue,
    message: &'static str,
) -> Result<Option<Option<FracAlign>>, ConfigParseError> {
    if value.is_null() {
        return Ok(Some(None));
    }
    Ok(keyword(string(value, message)?, message)?.map(Some))
}

impl MathTypeOptions {
    // This is the poor man's `serde_wasm_bindgen::from_value`.
    fn to_partial(&self) -> Result<PartialConfig, ConfigParseError> {
        Ok(PartialConfig {
            base_font_size: number(self.base_font_size(), "Invalid value for baseFontSize")?,
            math_font_family: string(self.math_font_family(), "Invalid value for mathFontFamily")?,
            ui_font_family: string(self.ui_font_family(), "Invalid value for uiFontFamily")?,
            script_scale: number(self.script_scale(), "Invalid value for scriptScale")?,
            script_min_size: number(self.script_min_size(), "Invalid value for scriptMinSize")?,
            frac_line_thickness: number(
                self.frac_line_thickness(),
                "Invalid value for fracLineThickness",
            )?,
            frac_num_align: alignment(self.frac_num_align(), "Invalid value for fracNumAlign")?,
            frac_denom_align: alignment(
                self.frac_denom_align(),
                "Invalid value for fracDenomAlign",
            )?,
            matrix_row_gap: number(self.matrix_row_gap(), "Invalid value for matrixRowGap")?,
            matrix_col_gap: number(self.matrix_col_gap(), "Invalid value for matrixColGap")?,
            fence_padding: number(self.fence_padding(), "Invalid value for fencePadding")?,
            operator_spacing: number(self.operator_spacing(), "Invalid value for operatorSpacing")?,
            use_operator_spacing: boolean(
                self.use_operator_spacing(),
                "Invalid value for useOperatorSpacing",
            )?,
            use_munderover: boolean(self.use_munderover(), "Invalid value for useMunderover")?,
            thin_space: number(self.thin_space(), "Invalid value for thinSpace")?,
            medium_space: number(self.medium_space(), "Invalid value for mediumSpace")?,
            thick_space: number(self.thick_space(), "Invalid value for thickSpace")?,
            quad: number(self.quad(), "Invalid value for quad")?,
            qquad: number(self.qquad(), "Invalid value for qquad")?,
            display_mode: boolean(self.display_mode(), "Invalid value for displayMode")?,
            pretty_print: keyword(
                string(self.pretty_print(), "Invalid value for prettyPrint")?,
                "Invalid value for prettyPrint",
            )?,
            annotation: boolean(self.annotation(), "Invalid value for annotation")?,
        })
    }
}

fn config_to_object(config: &Config) -> Object {
    let object = Object::new();
    let set = |key: &str, value: JsValue| {
        // Setting a property on a fresh plain object cannot fail.
        let _ = Reflect::set(&object, &JsValue::from_str(key), &value);
    };
    let align = |align: Option<FracAlign>| {
        align.map_or(JsValue::NULL, |align| JsValue::from_str(align.into()))
    };
    set("baseFontSize", config.base_font_size.into());
    set("mathFontFamily", JsValue::from_str(&config.math_font_family));
    set("uiFontFamily", JsValue::from_str(&config.ui_font_family));
    set("scriptScale", config.script_scale.into());
    set("scriptMinSize", config.script_min_size.into());
    set("fracLineThickness", config.frac_line_thickness.into());
    set("fracNumAlign", align(config.frac_num_align));
    set("fracDenomAlign", align(config.frac_denom_align));
    set("matrixRowGap", config.matrix_row_gap.into());
    set("matrixColGap", config.matrix_col_gap.into());
    set("fencePadding", config.fence_padding.into());
    set("operatorSpacing", config.operator_spacing.into());
    set("useOperatorSpacing", config.use_operator_spacing.into());
    set("useMunderover", config.use_munderover.into());
    set("thinSpace", config.thin_space.into());
    set("mediumSpace", config.medium_space.into());
    set("thickSpace", config.thick_space.into());
    set("quad", config.quad.into());
    set("qquad", config.qquad.into());
    set("displayMode", config.display_mode.into());
    set("prettyPrint", JsValue::from_str(config.pretty_print.into()));
    set("annotation", config.annotation.into());
    object
}

#[wasm_bindgen]
pub struct MathType {
    inner: Converter,
}

#[wasm_bindgen]
impl MathType {
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<MathTypeOptions>) -> Result<MathType, JsValue> {
        let config = match options {
            Some(options) => Config::from_partial(&options.to_partial()?),
            None => Config::default(),
        };
        Ok(MathType {
            inner: Converter::new(config),
        })
    }

    /// Converts `source` to MathML, with `overrides` applied for this call only.
    #[wasm_bindgen(js_name = toMathML, unchecked_return_type = "string")]
    pub fn to_mathml(
        &self,
        source: &str,
        overrides: Option<MathTypeOptions>,
    ) -> Result<JsValue, JsValue> {
        let mathml = match overrides {
            Some(overrides) => self
                .inner
                .with_overrides(&overrides.to_partial()?)
                .convert(source),
            None => self.inner.convert(source),
        };
        Ok(JsValue::from_str(&mathml))
    }

    /// Replaces the configuration with the defaults and `options` laid over them.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, options: &MathTypeOptions) -> Result<(), JsValue> {
        let config = Config::from_partial(&options.to_partial()?);
        self.inner = Converter::new(config);
        Ok(())
    }

    #[wasm_bindgen(getter, unchecked_return_type = "MathTypeOptions")]
    pub fn config(&self) -> JsValue {
        config_to_object(self.inner.config()).into()
    }
}

#[cfg(test)]
mod tests {
    use mathtype::PrettyPrint;

    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(
            keyword::<FracAlign>(Some("right".to_string()), "").unwrap(),
            Some(FracAlign::Right)
        );
        assert_eq!(
            keyword::<PrettyPrint>(Some("auto".to_string()), "").unwrap(),
            Some(PrettyPrint::Auto)
        );
        assert_eq!(keyword::<PrettyPrint>(None, "").unwrap(), None);
        let err = keyword::<PrettyPrint>(
            Some("sometimes".to_string()),
            "Invalid value for prettyPrint",
        )
        .unwrap_err();
        assert_eq!(err.message, "Invalid value for prettyPrint");
    }
}
