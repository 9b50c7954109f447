use float_cmp::approx_eq;
use svgfuse::{AId, Document, EId, Error, Options, PathData, PathSegment};

fn fuse_with(svg: &str, opt: &Options) -> Document {
    let mut doc = Document::parse_str(svg).unwrap();
    svgfuse::fuse_transforms(&mut doc, &[], opt).unwrap();
    doc
}

fn fuse(svg: &str) -> Document {
    fuse_with(svg, &Options::default())
}

fn attr<'a>(doc: &'a Document, id: &str, aid: AId) -> Option<&'a str> {
    doc.element_by_id(id).unwrap().attribute(aid)
}

fn tag(doc: &Document, id: &str) -> Option<EId> {
    doc.element_by_id(id).unwrap().tag_id()
}

fn points(d: &str) -> Vec<(f64, f64)> {
    PathData::parse(d)
        .unwrap()
        .iter()
        .filter_map(|seg| match *seg {
            PathSegment::MoveTo { x, y } => Some((x, y)),
            PathSegment::CurveTo { x, y, .. } => Some((x, y)),
            PathSegment::ClosePath => None,
        })
        .collect()
}

fn assert_points(d: &str, expected: &[(f64, f64)]) {
    let actual = points(d);
    assert_eq!(actual.len(), expected.len(), "{}", d);
    for (a, b) in actual.iter().zip(expected) {
        assert!(
            approx_eq!(f64, a.0, b.0, epsilon = 1e-6) && approx_eq!(f64, a.1, b.1, epsilon = 1e-6),
            "{:?} != {:?} in '{}'",
            a,
            b,
            d
        );
    }
}

#[test]
fn identity_transform() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' x='1.50' y='2' width='3' height='4' transform=''/>
        <path id='path1' d='M 0 0 L 10 0' transform='translate(0 0)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "rect1", AId::X), Some("1.50"));
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("3"));
    assert_eq!(attr(&doc, "rect1", AId::Transform), None);
    assert_eq!(attr(&doc, "path1", AId::D), Some("M 0 0 L 10 0"));
    assert_eq!(attr(&doc, "path1", AId::Transform), None);
}

#[test]
fn no_transforms_left() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' transform='scale(2)'>
        <g transform='translate(10 20)'>
            <g transform='rotate(45)'>
                <path d='M 0 0 L 1 1' transform='skewX(10)'/>
                <circle r='1' transform='scale(1 2)'/>
            </g>
            <text x='1' y='2' transform='scale(3)'>Text</text>
        </g>
        <defs transform='scale(2)'>
            <linearGradient x1='0' x2='1' transform='scale(2)'/>
        </defs>
    </svg>
    ";

    let doc = fuse(svg);
    assert!(doc
        .descendants()
        .all(|n| !n.has_attribute(AId::Transform)));
}

#[test]
fn path_translate() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <path id='path1' d='M0,0 L10,0 L10,10 Z' transform='translate(5,5)'/>
    </svg>
    ";

    let doc = fuse(svg);
    let d = attr(&doc, "path1", AId::D).unwrap();
    assert_eq!(d, "M 5 5 C 5 5 15 5 15 5 C 15 5 15 15 15 15 Z");
    assert_points(d, &[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0)]);
}

#[test]
fn path_relative_and_arcs() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <path id='path1' d='m 10 10 h 10 a 5 5 0 0 1 0 10 z' transform='scale(2)'/>
    </svg>
    ";

    let doc = fuse(svg);
    let d = attr(&doc, "path1", AId::D).unwrap();
    let points = points(d);
    assert_eq!(points[0], (20.0, 20.0));
    assert_eq!(points[1], (40.0, 20.0));

    let last = points[points.len() - 1];
    assert!(approx_eq!(f64, last.0, 40.0, epsilon = 1e-6));
    assert!(approx_eq!(f64, last.1, 40.0, epsilon = 1e-6));
}

#[test]
fn circle_uniform_scale() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <circle id='circle1' cx='5' cy='5' r='10' transform='scale(2)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(tag(&doc, "circle1"), Some(EId::Circle));
    assert_eq!(attr(&doc, "circle1", AId::R), Some("20"));
    assert_eq!(attr(&doc, "circle1", AId::Cx), Some("10"));
    assert_eq!(attr(&doc, "circle1", AId::Cy), Some("10"));
}

#[test]
fn circle_non_uniform_scale() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <circle id='circle1' r='10' transform='scale(2,3)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(tag(&doc, "circle1"), Some(EId::Ellipse));
    assert_eq!(attr(&doc, "circle1", AId::Rx), Some("20"));
    assert_eq!(attr(&doc, "circle1", AId::Ry), Some("30"));
    assert_eq!(attr(&doc, "circle1", AId::R), None);
}

#[test]
fn circle_mirrored() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <circle id='circle1' cx='10' cy='0' r='10' transform='scale(-1,1)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(tag(&doc, "circle1"), Some(EId::Ellipse));
    assert_eq!(attr(&doc, "circle1", AId::Cx), Some("-10"));
    assert_eq!(attr(&doc, "circle1", AId::Rx), Some("10"));
    assert_eq!(attr(&doc, "circle1", AId::Ry), Some("10"));
}

#[test]
fn ellipse_missing_radius() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <ellipse id='ellipse1' rx='2' transform='scale(2,3)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "ellipse1", AId::Rx), Some("4"));
    assert_eq!(attr(&doc, "ellipse1", AId::Ry), Some("6"));
}

#[test]
fn rect_negative_scale() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' x='0' y='0' width='10' height='10' transform='scale(-1,1)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "rect1", AId::X), Some("-10"));
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("10"));
    assert_eq!(attr(&doc, "rect1", AId::Y), Some("0"));
    assert_eq!(attr(&doc, "rect1", AId::Height), Some("10"));
}

#[test]
fn rect_negative_scale_without_position() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' width='10' height='4' transform='scale(1,-2)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "rect1", AId::X), None);
    assert_eq!(attr(&doc, "rect1", AId::Y), Some("-8"));
    assert_eq!(attr(&doc, "rect1", AId::Height), Some("8"));
}

#[test]
fn rect_corner_radii() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' width='10' height='10' rx='1' transform='scale(2,3)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "rect1", AId::Rx), Some("2"));
    assert_eq!(attr(&doc, "rect1", AId::Ry), Some("3"));
}

#[test]
fn position_ignores_translation() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' x='1' y='2' width='10' height='10' transform='translate(10 20)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "rect1", AId::X), Some("1"));
    assert_eq!(attr(&doc, "rect1", AId::Y), Some("2"));
}

#[test]
fn translate_positions() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' x='1' y='2' width='10' height='10' transform='translate(10 20) scale(2)'/>
        <rect id='rect2' width='10' height='10' transform='translate(5 0)'/>
    </svg>
    ";

    let opt = Options {
        translate_positions: true,
        ..Options::default()
    };

    let doc = fuse_with(svg, &opt);
    assert_eq!(attr(&doc, "rect1", AId::X), Some("12"));
    assert_eq!(attr(&doc, "rect1", AId::Y), Some("24"));
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("20"));
    // A missing position is zero.
    assert_eq!(attr(&doc, "rect2", AId::X), Some("5"));
    assert_eq!(attr(&doc, "rect2", AId::Y), None);
}

#[test]
fn stroke_width_in_style() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <path id='path1' style='fill:none;stroke-width:2' d='M 0 0 L 1 1' transform='scale(3)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "path1", AId::Style), Some("fill:none;stroke-width:6"));
}

#[test]
fn stroke_width_attribute() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g transform='scale(2)'>
            <path id='path1' stroke-width='1.5' d='M 0 0 L 1 1'/>
        </g>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "path1", AId::StrokeWidth), Some("3"));
}

#[test]
fn style_without_stroke_width() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <path id='path1' style='fill: red ; stroke:blue' d='M 0 0 L 1 1' transform='scale(3)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "path1", AId::Style), Some("fill: red ; stroke:blue"));
}

#[test]
fn nested_groups() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g id='g1' transform='translate(10,0)'>
            <g id='g2' transform='scale(2)'>
                <circle id='circle1' cx='1' cy='1' r='1'/>
            </g>
        </g>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "g1", AId::Transform), None);
    assert_eq!(attr(&doc, "g2", AId::Transform), None);
    assert_eq!(attr(&doc, "circle1", AId::Cx), Some("12"));
    assert_eq!(attr(&doc, "circle1", AId::Cy), Some("2"));
    assert_eq!(attr(&doc, "circle1", AId::R), Some("2"));
}

#[test]
fn containers_keep_geometry() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' x='5' width='100'>
        <g id='g1' transform='scale(2)'>
            <linearGradient id='lg1' x1='0' x2='1'/>
            <rect id='rect1' width='10' height='10'/>
        </g>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "g1", AId::Transform), None);
    assert_eq!(attr(&doc, "lg1", AId::X2), Some("1"));
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("20"));
}

#[test]
fn nested_viewport_is_moved() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g transform='scale(2)'>
            <svg id='svg1' x='5' width='50'>
                <rect id='rect1' width='10' height='10'/>
            </svg>
            <svg id='svg2' x='5' width='100%'>
                <rect id='rect2' width='10' height='10'/>
            </svg>
        </g>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "svg1", AId::X), Some("10"));
    assert_eq!(attr(&doc, "svg1", AId::Width), Some("100"));
    assert_eq!(attr(&doc, "rect1", AId::X), None);
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("20"));

    assert_eq!(attr(&doc, "svg2", AId::X), Some("10"));
    assert_eq!(attr(&doc, "svg2", AId::Width), Some("100%"));
    assert_eq!(attr(&doc, "rect2", AId::Width), Some("20"));
}

#[test]
fn nested_viewport_with_view_box() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g transform='scale(2)'>
            <svg id='svg1' width='50' height='50' viewBox='0 0 10 10'>
                <rect id='rect1' width='10' height='10'/>
            </svg>
        </g>
    </svg>
    ";

    // The viewBox already scales the content into the bigger viewport.
    let doc = fuse(svg);
    assert_eq!(attr(&doc, "svg1", AId::Width), Some("100"));
    assert_eq!(attr(&doc, "svg1", AId::Height), Some("100"));
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("10"));
    assert_eq!(attr(&doc, "rect1", AId::Height), Some("10"));
}

#[test]
fn nested_viewport_mirrored() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g transform='scale(-1,1)'>
            <svg id='svg1' x='10' width='20' height='20'>
                <rect id='rect1' x='0' width='5' height='5'/>
            </svg>
        </g>
    </svg>
    ";

    let opt = Options {
        translate_positions: true,
        ..Options::default()
    };

    // The rect covered -15..-10 after mirroring.
    let doc = fuse_with(svg, &opt);
    assert_eq!(attr(&doc, "svg1", AId::X), Some("-30"));
    assert_eq!(attr(&doc, "svg1", AId::Width), Some("20"));
    assert_eq!(attr(&doc, "rect1", AId::X), Some("15"));
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("5"));
}

#[test]
fn polygon_points() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <polygon id='polygon1' points='0,0 10,0 10,10' transform='translate(1,1)'/>
        <polyline id='polyline1' points='0 0 5 5' transform='scale(2)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "polygon1", AId::Points), Some("1,1 11,1 11,11"));
    assert_eq!(attr(&doc, "polyline1", AId::Points), Some("0,0 10,10"));
}

#[test]
fn line_end_points() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <line id='line1' x1='1' y1='2' x2='3' transform='translate(10 20)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "line1", AId::X1), Some("11"));
    assert_eq!(attr(&doc, "line1", AId::Y1), Some("22"));
    assert_eq!(attr(&doc, "line1", AId::X2), Some("13"));
    assert_eq!(attr(&doc, "line1", AId::Y2), Some("20"));
}

#[test]
fn generic_element() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <text id='text1' x='1' y='2' transform='scale(2,3)'>Text</text>
        <use id='use1' x='1' width='5' transform='scale(2)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "text1", AId::X), Some("2"));
    assert_eq!(attr(&doc, "text1", AId::Y), Some("6"));
    assert_eq!(doc.element_by_id("text1").unwrap().text(), "Text");
    assert_eq!(attr(&doc, "use1", AId::X), Some("2"));
    assert_eq!(attr(&doc, "use1", AId::Width), Some("10"));
}

#[test]
fn units_are_preserved() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <circle id='circle1' cx='5mm' cy='1in' r='10mm' transform='scale(2)'/>
        <path id='path1' style='stroke-width:1pt' d='M 0 0 L 1 1' transform='scale(2)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "circle1", AId::R), Some("20mm"));
    assert_eq!(attr(&doc, "circle1", AId::Cx), Some("10mm"));
    // Both center coordinates use the `cx` unit.
    assert_eq!(attr(&doc, "circle1", AId::Cy), Some("50.8mm"));
    assert_eq!(attr(&doc, "path1", AId::Style), Some("stroke-width:2pt"));
}

#[test]
fn document_unit() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' width='210mm' viewBox='0 0 210 297'>
        <rect id='rect1' x='1' width='1mm' height='10px' transform='scale(2)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "rect1", AId::X), Some("2"));
    // The document unit is written as a plain number.
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("2"));
    assert_eq!(attr(&doc, "rect1", AId::Height), Some("20px"));
}

#[test]
fn document_unit_without_view_box() {
    // Without a `viewBox`, a user unit is a pixel, whatever the `width` unit is.
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' width='210mm'>
        <rect id='rect1' x='1' width='1mm' height='10px' transform='scale(2)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "rect1", AId::X), Some("2"));
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("2mm"));
    assert_eq!(attr(&doc, "rect1", AId::Height), Some("20"));
}

#[test]
fn pixel_drawing_on_millimeter_page() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' width='210mm' viewBox='0 0 793.7007874 1122.519685'>
        <circle id='circle1' cx='10mm' r='1' transform='translate(37.795275591,0)'/>
    </svg>
    ";

    // 10mm plus 10mm written in pixels.
    let doc = fuse(svg);
    assert_eq!(attr(&doc, "circle1", AId::Cx), Some("20mm"));
    assert_eq!(attr(&doc, "circle1", AId::R), Some("1"));
}

#[test]
fn editor_attributes_are_removed_from_paths() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'
         xmlns:sodipodi='http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd'
         xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'>
        <sodipodi:namedview id='view1' inkscape:zoom='2'/>
        <g id='g1' inkscape:label='Layer' inkscape:groupmode='layer'>
            <path id='path1' d='M 0 0 L 1 1' sodipodi:nodetypes='cc' inkscape:connector-curvature='0'/>
            <rect id='rect1' width='1' height='1' inkscape:label='Rect'/>
        </g>
    </svg>
    ";

    let doc = fuse(svg);
    let path = doc.element_by_id("path1").unwrap();
    assert_eq!(path.attributes().len(), 2);
    assert!(path.has_attribute(AId::D));

    let g = doc.element_by_id("g1").unwrap();
    assert_eq!(g.attributes().len(), 3);

    let rect = doc.element_by_id("rect1").unwrap();
    assert_eq!(
        rect.attribute_ns("http://www.inkscape.org/namespaces/inkscape", "label"),
        Some("Rect")
    );
}

#[test]
fn selection() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g id='g1' transform='scale(2)'>
            <rect id='rect1' width='1' height='1'/>
        </g>
        <g id='g2' transform='scale(2)'>
            <rect id='rect2' width='1' height='1'/>
        </g>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let selection = svgfuse::resolve_selection(&doc, &["g1", "unknown"]);
    assert_eq!(selection.len(), 1);

    svgfuse::fuse_transforms(&mut doc, &selection, &Options::default()).unwrap();
    assert_eq!(attr(&doc, "g1", AId::Transform), None);
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("2"));
    assert_eq!(attr(&doc, "g2", AId::Transform), Some("scale(2)"));
    assert_eq!(attr(&doc, "rect2", AId::Width), Some("1"));
}

#[test]
fn selection_ignores_ancestors() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g id='g1' transform='translate(100 100)'>
            <circle id='circle1' cx='1' cy='1' r='1' transform='scale(2)'/>
        </g>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let selection = svgfuse::resolve_selection(&doc, &["circle1"]);
    svgfuse::fuse_transforms(&mut doc, &selection, &Options::default()).unwrap();

    assert_eq!(attr(&doc, "g1", AId::Transform), Some("translate(100 100)"));
    assert_eq!(attr(&doc, "circle1", AId::Cx), Some("2"));
    assert_eq!(attr(&doc, "circle1", AId::R), Some("2"));
}

#[test]
fn malformed_transform() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' width='10' height='10' transform='qwe(2)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(attr(&doc, "rect1", AId::Transform), None);
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("10"));
}

#[test]
fn invalid_number() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' x='abc' width='10' height='10' transform='scale(2)'/>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let res = svgfuse::fuse_transforms(&mut doc, &[], &Options::default());
    match res {
        Err(Error::InvalidAttribute {
            element,
            attribute,
            value,
        }) => {
            assert_eq!(element, "rect1");
            assert_eq!(attribute, "x");
            assert_eq!(value, "abc");
        }
        _ => panic!("expected an error"),
    }
}

#[test]
fn invalid_path_data() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g transform='scale(2)'>
            <path d='M 10 L 20'/>
        </g>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let res = svgfuse::fuse_transforms(&mut doc, &[], &Options::default());
    match res {
        Err(Error::InvalidAttribute {
            element, attribute, ..
        }) => {
            assert_eq!(element, "path");
            assert_eq!(attribute, "d");
        }
        _ => panic!("expected an error"),
    }
}

#[test]
fn rotated_shape_without_conversion() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' width='10' height='10' transform='rotate(90)'/>
    </svg>
    ";

    let doc = fuse(svg);
    assert_eq!(tag(&doc, "rect1"), Some(EId::Rect));
    assert_eq!(attr(&doc, "rect1", AId::Transform), None);
}

#[test]
fn rotated_rect_conversion() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' width='10' height='10' fill='red' transform='rotate(90)'/>
    </svg>
    ";

    let opt = Options {
        convert_shapes: true,
        ..Options::default()
    };

    let doc = fuse_with(svg, &opt);
    assert_eq!(tag(&doc, "rect1"), Some(EId::Path));
    assert_eq!(attr(&doc, "rect1", AId::Width), None);
    assert_eq!(attr(&doc, "rect1", AId::Height), None);
    assert_eq!(attr(&doc, "rect1", AId::Transform), None);
    assert_eq!(
        doc.element_by_id("rect1").unwrap().attributes()[1].value,
        "red"
    );

    let d = attr(&doc, "rect1", AId::D).unwrap();
    assert_points(
        d,
        &[(0.0, 0.0), (0.0, 10.0), (-10.0, 10.0), (-10.0, 0.0)],
    );
}

#[test]
fn skewed_circle_conversion() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <circle id='circle1' cx='0' cy='0' r='10' transform='skewX(45)'/>
    </svg>
    ";

    let opt = Options {
        convert_shapes: true,
        ..Options::default()
    };

    let doc = fuse_with(svg, &opt);
    assert_eq!(tag(&doc, "circle1"), Some(EId::Path));
    assert_eq!(attr(&doc, "circle1", AId::R), None);

    // The bottom point (0, 10) is moved by the skew.
    let d = attr(&doc, "circle1", AId::D).unwrap();
    assert!(points(d)
        .iter()
        .any(|p| approx_eq!(f64, p.0, 10.0, epsilon = 1e-6)
            && approx_eq!(f64, p.1, 10.0, epsilon = 1e-6)));
}

#[test]
fn scaled_shape_is_not_converted() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='rect1' width='10' height='10' transform='scale(2)'/>
    </svg>
    ";

    let opt = Options {
        convert_shapes: true,
        ..Options::default()
    };

    let doc = fuse_with(svg, &opt);
    assert_eq!(tag(&doc, "rect1"), Some(EId::Rect));
    assert_eq!(attr(&doc, "rect1", AId::Width), Some("20"));
}

#[test]
fn unprefixed_elements() {
    let svg = "
    <svg:svg xmlns:svg='http://www.w3.org/2000/svg'>
        <svg:circle id='circle1' r='1' transform='scale(1 2)'/>
    </svg:svg>
    ";

    let doc = fuse(svg);
    let node = doc.element_by_id("circle1").unwrap();
    assert_eq!(node.tag_id(), Some(EId::Ellipse));
    assert_eq!(node.tag_name().unwrap().to_string(), "svg:ellipse");
}
