use stencil::model::{Background, Region, SceneSnapshot, Vec2, Vertex};
use stencil::{to_export_svg, EditorConfig, EditorContext, FinalizeOutcome};

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn ctx_with_square() -> EditorContext {
    let mut ctx = EditorContext::new(EditorConfig::default());
    ctx.begin_region(v(10.0, 10.0)).unwrap();
    ctx.add_point(v(50.0, 10.0)).unwrap();
    ctx.add_point(v(50.0, 50.0)).unwrap();
    ctx.add_point(v(10.0, 50.0)).unwrap();
    assert_eq!(ctx.finalize_region().unwrap(), FinalizeOutcome::Committed);
    ctx
}

#[test]
fn straight_regions_export_as_polygons() {
    let ctx = ctx_with_square();
    let svg = ctx.export_svg(false);
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains("width=\"800\" height=\"600\" viewBox=\"0 0 800 600\""));
    assert!(svg.contains("<polygon id=\"Area_1\" points=\"10,10 50,10 50,50 10,50\""));
    assert!(svg.contains("stroke=\"black\" stroke-width=\"1.5\""));
    assert!(svg.ends_with("</svg>"));
    assert!(!svg.contains("<image"), "no background was requested");
}

#[test]
fn curved_regions_export_as_closed_paths() {
    let mut ctx = EditorContext::new(EditorConfig::default());
    ctx.begin_region(v(10.0, 10.0)).unwrap();
    ctx.add_point(v(50.0, 10.0)).unwrap();
    ctx.add_curve_point(v(50.0, 50.0), v(80.0, 30.0)).unwrap();
    ctx.add_point(v(10.0, 50.0)).unwrap();
    assert_eq!(ctx.finalize_region().unwrap(), FinalizeOutcome::Committed);

    let svg = ctx.export_svg(false);
    assert!(!svg.contains("<polygon"));
    assert!(svg.contains("d=\"M 10 10 L 50 10 Q 80 30 50 50 L 10 50 Z\""));
}

#[test]
fn background_dimensions_define_the_export_space() {
    let mut ctx = ctx_with_square();
    ctx.set_background(Some(Background {
        href: "data:image/png;base64,AAAA".into(),
        width: 1024,
        height: 768,
    }))
    .unwrap();

    let svg = ctx.export_svg(true);
    assert!(svg.contains("width=\"1024\" height=\"768\" viewBox=\"0 0 1024 768\""));
    assert!(svg.contains(
        "<image id=\"bgImage\" x=\"0\" y=\"0\" width=\"1024\" height=\"768\" href=\"data:image/png;base64,AAAA\" preserveAspectRatio=\"none\" />"
    ));
    assert!(!svg.contains("transform"), "alignment comes from sizing, never transforms");
    assert!(!svg.contains("xlink"), "plain href only");

    // The image must render underneath every region.
    let image_at = svg.find("<image").unwrap();
    let polygon_at = svg.find("<polygon").unwrap();
    assert!(image_at < polygon_at);
}

#[test]
fn excluding_the_background_falls_back_to_canvas_size() {
    let mut ctx = ctx_with_square();
    ctx.set_background(Some(Background {
        href: "data:image/png;base64,AAAA".into(),
        width: 1024,
        height: 768,
    }))
    .unwrap();
    ctx.set_canvas_size(400, 300).unwrap();

    let svg = ctx.export_svg(false);
    assert!(svg.contains("width=\"400\" height=\"300\" viewBox=\"0 0 400 300\""));
    assert!(!svg.contains("<image"));
}

#[test]
fn attribute_text_is_xml_escaped() {
    let mut snap = SceneSnapshot::empty();
    snap.regions.push(Region {
        id: "a<b>&\"c\"'d'".into(),
        vertices: vec![
            Vertex { x: 0, y: 0, control: None },
            Vertex { x: 10, y: 0, control: None },
            Vertex { x: 0, y: 10, control: None },
        ],
        fill_color: "#112233".into(),
        fill_opacity: 0.3,
        label: None,
    });
    let bg = Background {
        href: "data:image/svg+xml,<svg a=\"1\"&'2'>".into(),
        width: 10,
        height: 10,
    };

    let svg = to_export_svg(&snap, 10, 10, Some(&bg));
    assert!(svg.contains("id=\"a&lt;b&gt;&amp;&quot;c&quot;&apos;d&apos;\""));
    assert!(svg.contains("href=\"data:image/svg+xml,&lt;svg a=&quot;1&quot;&amp;&apos;2&apos;&gt;\""));
}

#[test]
fn fill_style_comes_from_the_region() {
    let ctx = ctx_with_square();
    let svg = ctx.export_svg(false);
    assert!(svg.contains("fill=\"#cccccc\" fill-opacity=\"0.5\""));
}
