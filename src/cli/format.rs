//! Format output dispatch helpers

/// Dispatch output by format when the json branch returns a Result.
///
/// ```rust,ignore
/// output_by_format_result!(cli.format,
///     json => print_json(&report),
///     human => { println!("Done"); }
/// )?;
/// ```
#[macro_export]
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}
