// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use pico_args::Arguments;

const HELP: &str = "\
svgfuse bakes SVG transform attributes into the element geometry.

USAGE:
  svgfuse [OPTIONS] <in-svg> <out-svg>  # from file to file
  svgfuse [OPTIONS] <in-svg> -c         # from file to stdout
  svgfuse [OPTIONS] - <out-svg>         # from stdin to file
  svgfuse [OPTIONS] - -c                # from stdin to stdout

OPTIONS:
  -h, --help                        Prints help information
  -V, --version                     Prints version information
  -c                                Prints the output SVG to the stdout

  --id ID                           Processes only the element with the specified ID
                                    and its descendants.
                                    This option can be set multiple times
                                    [default: the whole document]
  --unit UNIT                       Sets the document unit
                                    [possible values: in, pt, px, mm, cm, m, km, pc, yd, ft]
                                    [default: detected from the document or px]
  --translate-positions             Applies the transform translation to
                                    'x' and 'y' attributes
  --convert-shapes                  Converts shapes into paths when the transform
                                    has a rotation or a skew
  --precision NUM                   Sets the numeric precision
                                    [values: 1..12 (inclusive)] [default: 8]
  --indent INDENT                   Sets the XML nodes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: 4]
  --attrs-indent INDENT             Sets the XML attributes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: none]
  --quiet                           Disables warnings

ARGS:
  <in-svg>                          Input file
  <out-svg>                         Output file. Compressed when ends with '.svgz'
";

#[derive(Debug)]
struct Args {
    ids: Vec<String>,
    unit: Option<svgfuse::Unit>,
    translate_positions: bool,
    convert_shapes: bool,
    precision: Option<u8>,

    indent: svgfuse::Indent,
    attrs_indent: svgfuse::Indent,

    quiet: bool,

    input: String,
    output: String,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    Ok(Args {
        ids: input.values_from_str("--id")?,
        unit: input.opt_value_from_fn("--unit", parse_unit)?,
        translate_positions: input.contains("--translate-positions"),
        convert_shapes: input.contains("--convert-shapes"),
        precision: input.opt_value_from_fn("--precision", parse_precision)?,

        indent: input
            .opt_value_from_fn("--indent", parse_indent)?
            .unwrap_or(svgfuse::Indent::Spaces(4)),
        attrs_indent: input
            .opt_value_from_fn("--attrs-indent", parse_indent)?
            .unwrap_or(svgfuse::Indent::None),

        quiet: input.contains("--quiet"),

        input: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

fn parse_unit(s: &str) -> Result<svgfuse::Unit, String> {
    svgfuse::Unit::from_str(s).ok_or_else(|| "invalid UNIT value".to_string())
}

fn parse_indent(s: &str) -> Result<svgfuse::Indent, String> {
    let indent = match s {
        "none" => svgfuse::Indent::None,
        "0" => svgfuse::Indent::Spaces(0),
        "1" => svgfuse::Indent::Spaces(1),
        "2" => svgfuse::Indent::Spaces(2),
        "3" => svgfuse::Indent::Spaces(3),
        "4" => svgfuse::Indent::Spaces(4),
        "tabs" => svgfuse::Indent::Tabs,
        _ => return Err("invalid INDENT value".to_string()),
    };

    Ok(indent)
}

fn parse_precision(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| "invalid precision NUM value")?;

    if (1..=12).contains(&n) {
        Ok(n)
    } else {
        Err("precision NUM cannot be smaller than 1 or larger than 12".to_string())
    }
}

#[derive(Clone, PartialEq, Debug)]
enum InputFrom<'a> {
    Stdin,
    File(&'a str),
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo<'a> {
    Stdout,
    File(&'a str),
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}

fn process(args: Args) -> Result<(), String> {
    let (in_svg, out_svg) = {
        let in_svg = args.input.as_str();
        let out_svg = args.output.as_str();

        let svg_from = if in_svg == "-" {
            InputFrom::Stdin
        } else if in_svg == "-c" {
            return Err("-c should be set after input".to_string());
        } else {
            InputFrom::File(in_svg)
        };

        let svg_to = if out_svg == "-c" {
            OutputTo::Stdout
        } else {
            OutputTo::File(out_svg)
        };

        (svg_from, svg_to)
    };

    let input_svg = match in_svg {
        InputFrom::Stdin => load_stdin(),
        InputFrom::File(path) => std::fs::read(path).map_err(|e| e.to_string()),
    }?;

    let mut doc = svgfuse::Document::from_data(&input_svg).map_err(|e| e.to_string())?;

    let opt = svgfuse::Options {
        document_unit: args.unit,
        translate_positions: args.translate_positions,
        convert_shapes: args.convert_shapes,
        precision: args.precision.unwrap_or(8),
    };

    let selection = svgfuse::resolve_selection(&doc, &args.ids);
    svgfuse::fuse_transforms(&mut doc, &selection, &opt).map_err(|e| e.to_string())?;

    let xml_opt = svgfuse::WriteOptions {
        use_single_quote: false,
        indent: args.indent,
        attributes_indent: args.attrs_indent,
    };

    let s = doc.to_string(&xml_opt);
    match out_svg {
        OutputTo::Stdout => {
            io::stdout()
                .write_all(s.as_bytes())
                .map_err(|_| "failed to write to the stdout".to_string())?;
        }
        OutputTo::File(path) => {
            let data = if path.ends_with(".svgz") {
                svgfuse::compress_svgz(s.as_bytes())
                    .map_err(|_| "failed to compress the output".to_string())?
            } else {
                s.into_bytes()
            };

            let mut f =
                File::create(path).map_err(|_| "failed to create the output file".to_string())?;
            f.write_all(&data)
                .map_err(|_| "failed to write to the output file".to_string())?;
        }
    }

    Ok(())
}

fn load_stdin() -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    let stdin = io::stdin();
    let mut handle = stdin.lock();

    handle
        .read_to_end(&mut buf)
        .map_err(|_| "failed to read from stdin".to_string())?;

    Ok(buf)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
