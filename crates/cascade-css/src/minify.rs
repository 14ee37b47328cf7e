//! Reprinting of server-pass stylesheets through lightningcss.
//!
//! The server bundle is not minified so its JavaScript stays debuggable,
//! which leaves its CSS unminified too. This pass fixes up just the CSS.

use cascade_graph::{AssetSource, Output, OutputBundle};
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};

use crate::error::{CssError, Result};

/// Reprint every text `.css` asset, minifying when `minify` is set.
/// Returns the number of assets rewritten.
pub fn minify_css_assets(bundle: &mut OutputBundle, minify: bool) -> Result<usize> {
    let mut rewritten = 0;

    for output in bundle.values_mut() {
        let Output::Asset(asset) = output else {
            continue;
        };
        let is_css = asset
            .name
            .as_deref()
            .unwrap_or(asset.file_name.as_str())
            .ends_with(".css");
        if !is_css {
            continue;
        }
        let AssetSource::Text(source) = &asset.source else {
            continue;
        };

        let before = source.len();
        let code = process_css(&asset.file_name, source, minify)?;
        tracing::debug!(
            asset = %asset.file_name,
            before,
            after = code.len(),
            minify,
            "reprinted CSS asset"
        );
        asset.source = AssetSource::Text(code);
        rewritten += 1;
    }

    Ok(rewritten)
}

fn process_css(file_name: &str, source: &str, minify: bool) -> Result<String> {
    let error = |message: String| CssError::Minify {
        asset: file_name.to_string(),
        message,
    };

    let mut stylesheet = StyleSheet::parse(
        source,
        ParserOptions {
            filename: file_name.to_string(),
            ..Default::default()
        },
    )
    .map_err(|e| error(format!("parse: {:?}", e)))?;

    if minify {
        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| error(format!("minify: {:?}", e)))?;
    }

    let result = stylesheet
        .to_css(PrinterOptions {
            minify,
            ..Default::default()
        })
        .map_err(|e| error(format!("print: {:?}", e)))?;

    Ok(result.code)
}
