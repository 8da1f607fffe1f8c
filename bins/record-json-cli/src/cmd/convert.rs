use std::io::Read;

use record_json::json;
use record_json::{ObjectOutput, PojoConvertor};

use crate::config::ConvertArgs;
use crate::domain::Quote;
use crate::error::CliError;

pub fn run(args: ConvertArgs) -> Result<(), CliError> {
    let options = args.options.load()?;
    let convertor = PojoConvertor::<Quote>::with_options(options)?;

    let text = read_input(&args.input)?;
    let object = json::parse_object(&text)?;
    tracing::debug!(input = %args.input, keys = object.len(), "parsed input");

    let (quote, read) = convertor.from_json_with_report(&object)?;
    for key in &read.ignored {
        tracing::info!(key = %key, "no setter for key, ignored");
    }

    let mut out = ObjectOutput::new();
    let written = convertor.to_json(&quote, &mut out);

    let value = out.into_value();
    let rendered = if args.pretty {
        json::to_string_pretty(&value)?
    } else {
        json::to_string(&value)?
    };
    println!("{rendered}");

    let failures = read.skipped.len() + written.skipped.len();
    tracing::info!(
        applied = read.converted.len(),
        written = written.converted.len(),
        failures,
        "quote converted"
    );
    if args.strict && failures > 0 {
        return Err(CliError::Incomplete(failures));
    }
    Ok(())
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Input {
                path: path.to_string(),
                source,
            })?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::Input {
            path: path.to_string(),
            source,
        })
    }
}
