use std::time::Duration;

use fit_content::{
    dom, extract, extract_live, pdf, ContentSource, Error, FailureCause, Frozen, Options, Page,
};
use pretty_assertions::assert_eq;

const REPORT_URL: &str = "https://example.com/files/bao-cao-quy-ba.pdf";

const PAGE_ONE: &[&str] = &[
    "Báo cáo tài chính quý ba của doanh nghiệp",
    "Doanh thu tăng mạnh nhờ thị trường trong nước và xuất khẩu",
    "Lợi nhuận sau thuế đạt mức cao nhất trong năm qua",
    "Chi phí vận hành được kiểm soát tốt hơn so với cùng kỳ",
    "1",
];

const PAGE_TWO: &[&str] = &[
    "Chính phủ đã hỗ trợ các doanh nghiệp nhỏ và vừa",
    "Thị trường chứng khoán Việt Nam được dự báo sẽ tiếp tục tăng",
    "Các nhà đầu tư nước ngoài quay trở lại mua ròng",
    "Kế hoạch năm tới tập trung vào mở rộng sản xuất",
    "Page 2 of 2",
];

const NO_SPANS: &[&str] = &[];

/// A pdf.js-style viewer. `None` pages render as empty page shells.
fn viewer(title: &str, pages: &[Option<&[&str]>]) -> String {
    let mut html = format!(
        r#"<html lang="en"><head><title>{title}</title></head><body><div id="viewer">"#
    );
    for (i, spans) in pages.iter().enumerate() {
        html.push_str(&format!(r#"<div class="page" data-page-number="{}">"#, i + 1));
        if let Some(spans) = spans {
            html.push_str(r#"<div class="textLayer">"#);
            for span in *spans {
                html.push_str(&format!("<span>{span}</span>"));
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }
    html.push_str("</div></body></html>");
    html
}

#[test]
fn text_layer_pages_are_joined_and_cleaned() {
    let html = viewer("bao-cao-quy-ba.pdf - Google Chrome", &[Some(PAGE_ONE), Some(PAGE_TWO)]);
    let result = extract(&html, REPORT_URL).unwrap();

    let expected = [&PAGE_ONE[..4].join("\n"), &PAGE_TWO[..4].join("\n")].map(String::as_str).join("\n\n");
    assert_eq!(result.content, expected);
    assert_eq!(result.source, ContentSource::Pdf);
    assert_eq!(result.title, "bao-cao-quy-ba");
    // Statistics outrank both the viewer's lang and the .com host.
    assert_eq!(result.language, "vi");
    assert!(result.byline.is_none());
}

#[test]
fn running_headers_are_dropped() {
    let pages: Vec<Vec<String>> = (1..=3)
        .map(|n| {
            vec![
                "ACME Corp Annual Report".to_string(),
                format!("Section {n} explains how the company grew its revenue this year."),
                format!("Page {n} of 3"),
            ]
        })
        .collect();
    let pages: Vec<Vec<&str>> = pages.iter().map(|p| p.iter().map(String::as_str).collect()).collect();
    let html = viewer("Annual Report", &pages.iter().map(|p| Some(p.as_slice())).collect::<Vec<_>>());

    let result = extract(&html, "https://example.com/report.pdf").unwrap();
    assert!(!result.content.contains("ACME Corp"));
    assert!(!result.content.contains("of 3"));
    assert_eq!(result.content.matches("Section").count(), 3);
    assert_eq!(result.language, "en");
    assert_eq!(result.title, "Annual Report");
}

#[test]
fn short_text_layer_falls_back_to_viewer_text() {
    let html = format!(
        r#"<html><head><title>Scan.pdf</title></head><body><div id="viewer">
            <div class="page" data-page-number="1"><div class="textLayer"><span>tiny</span></div></div>
            <p>{}</p>
        </div></body></html>"#,
        "Viewer fallback text that is long enough to pass the minimum. ".repeat(3)
    );
    let result = extract(&html, "https://example.com/scan.pdf").unwrap();
    assert!(result.content.contains("tiny"));
    assert!(result.content.contains("Viewer fallback text"));
}

#[test]
fn embedded_plugin_is_protected() {
    let html = r#"<html><body><embed type="application/pdf" src="doc.pdf"></body></html>"#;
    match extract(html, "https://example.com/view") {
        Err(Error::ExtractionFailure(cause)) => assert_eq!(cause, FailureCause::Protected),
        other => panic!("expected ExtractionFailure, got {other:?}"),
    }
}

#[test]
fn empty_text_layer_is_image_based() {
    let html = viewer("Scan.pdf", &[Some(NO_SPANS), Some(NO_SPANS)]);
    match extract(&html, "https://example.com/scan.pdf") {
        Err(Error::ExtractionFailure(cause)) => assert_eq!(cause, FailureCause::ImageBased),
        other => panic!("expected ExtractionFailure, got {other:?}"),
    }
}

#[test]
fn failure_causes_by_document_shape() {
    let loading = dom::parse(r#"<div id="viewer"><div class="spinner"></div></div>"#);
    assert_eq!(pdf::failure_cause(&loading, false), FailureCause::StillLoading);

    let thin = dom::parse(&viewer("x.pdf", &[Some(&["just a few words"][..])]));
    assert_eq!(pdf::failure_cause(&thin, false), FailureCause::InsufficientText);
    assert_eq!(pdf::failure_cause(&thin, true), FailureCause::StillLoading);
}

#[test]
fn failure_messages_are_human_readable() {
    let err = Error::ExtractionFailure(FailureCause::ImageBased);
    assert!(err.to_string().to_lowercase().contains("image"));
}

#[tokio::test(start_paused = true)]
async fn live_extraction_waits_for_text_layer() {
    let shell = viewer("report.pdf", &[None, None]);
    let rendered = viewer("report.pdf", &[Some(PAGE_ONE), Some(PAGE_TWO)]);

    let mut polls = 0;
    let mut source = move || {
        polls += 1;
        (polls == 4).then(|| rendered.clone())
    };

    let start = tokio::time::Instant::now();
    let mut page = Page::new(&shell, REPORT_URL);
    let result = extract_live(&mut page, &mut source, &Options::default()).await.unwrap();

    assert!(result.content.starts_with("Báo cáo tài chính"));
    // Fourth poll, three intervals in.
    let waited = start.elapsed();
    assert!(waited >= Duration::from_millis(300) && waited < Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn live_extraction_gives_up_after_timeout() {
    let shell = viewer("report.pdf", &[None]);
    let options = Options {
        pdf_wait_timeout_ms: 1_000,
        ..Options::default()
    };

    let start = tokio::time::Instant::now();
    let mut page = Page::new(&shell, REPORT_URL);
    match extract_live(&mut page, &mut Frozen, &options).await {
        Err(Error::ExtractionFailure(cause)) => assert_eq!(cause, FailureCause::StillLoading),
        other => panic!("expected ExtractionFailure, got {other:?}"),
    }
    let waited = start.elapsed();
    assert!(waited >= Duration::from_millis(1_000) && waited < Duration::from_millis(1_100));
}

#[tokio::test(start_paused = true)]
async fn wait_reports_timeout() {
    let mut page = Page::new(&viewer("x.pdf", &[None]), REPORT_URL);
    let options = Options {
        pdf_wait_timeout_ms: 250,
        pdf_poll_interval_ms: 100,
        ..Options::default()
    };
    match pdf::wait_for_text_layer(&mut page, &mut Frozen, &options).await {
        Err(Error::Timeout { waited }) => {
            assert!(waited >= Duration::from_millis(250) && waited < Duration::from_millis(300));
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[test]
fn title_resolution() {
    assert_eq!(pdf::resolve_title("Q3 Results.pdf | Intranet", "about:blank"), "Q3 Results");
    assert_eq!(pdf::resolve_title("Loading", "https://a.example/d/Final%20Draft.pdf"), "Final Draft");
    assert_eq!(pdf::resolve_title("", "https://a.example/"), pdf::DEFAULT_PDF_TITLE);
}
