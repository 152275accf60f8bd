//! End-to-end: real .docx and .pdf files on disk through extraction, skills
//! and ranking.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use serde_json::json;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use matcher::{
    extract_skills, extract_text, extract_text_from_bytes, rank_jobs, ExtractError,
    ExtractedSkillSet, Job, MatchEngine, RankedJobList,
};

/// Word writes empty runs as self-closing `<w:t/>` elements.
fn paragraph(text: &str) -> String {
    if text.is_empty() {
        return "<w:p><w:r><w:t xml:space=\"preserve\"/></w:r></w:p>".to_string();
    }
    format!("<w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>")
}

fn write_docx(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let body: String = paragraphs.iter().map(|p| paragraph(p)).collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Smallest PDF `pdf-extract` accepts: one Helvetica text line per page and a
/// hand-built xref table.
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];
    for (i, text) in pages.iter().enumerate() {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_start = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
        objects.len() + 1
    ));
    out.extend_from_slice(xref.as_bytes());
    out
}

#[test]
fn test_docx_resume_ranks_matching_job_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(
        dir.path(),
        "resume.docx",
        &[
            "Alex Kim",
            "Frontend developer building JavaScript apps with React &amp; CSS.",
            "",
            "Skills:",
            "JavaScript, React, CSS",
        ],
    );

    let engine = MatchEngine::default();
    let skills = engine.skills_from_file(&path, "docx").unwrap();
    assert_eq!(skills.clone().into_vec(), vec!["css", "javascript", "react"]);

    let jobs = vec![
        Job::new("Django Developer", &["python", "django"]),
        Job::new("React Developer", &["javascript", "react"]),
    ];
    let ranked = engine.rank(&skills, jobs);
    let scored = ranked.scored().unwrap();

    assert_eq!(scored.len(), 2);
    assert_eq!(scored[0].job.title, "React Developer");
    assert_eq!(scored[0].match_score, 1.0);
    assert!(scored[0].is_recommended);
    assert_eq!(scored[1].job.title, "Django Developer");
    assert_eq!(scored[1].match_score, 0.0);
    assert!(!scored[1].is_recommended);
}

#[test]
fn test_blank_lines_in_docx_separate_skill_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(
        dir.path(),
        "cv.docx",
        &["Experience", "Ran Kafka on Kubernetes", "", "Technologies", "Go • Terraform"],
    );

    let text = extract_text(&path, ".DOCX").unwrap();
    assert!(text.contains("\n\nTechnologies\n"));

    let skills = extract_skills(&text);
    for expected in ["kafka", "kubernetes", "go", "terraform"] {
        assert!(skills.contains(expected), "missing {expected}");
    }
}

#[test]
fn test_unsupported_and_corrupt_uploads() {
    let dir = tempfile::tempdir().unwrap();

    let txt = dir.path().join("resume.txt");
    std::fs::write(&txt, "Python").unwrap();
    assert!(matches!(
        extract_text(&txt, "txt"),
        Err(ExtractError::UnsupportedFormat(_))
    ));

    let fake_docx = dir.path().join("resume.docx");
    std::fs::write(&fake_docx, "not really a docx").unwrap();
    assert!(matches!(
        extract_text(&fake_docx, "docx"),
        Err(ExtractError::Parse { .. })
    ));

    let fake_pdf = dir.path().join("resume.pdf");
    std::fs::write(&fake_pdf, "not really a pdf").unwrap();
    assert!(matches!(
        extract_text(&fake_pdf, "application/pdf"),
        Err(ExtractError::Parse { .. })
    ));

    assert!(matches!(
        extract_text(dir.path().join("gone.pdf"), "pdf"),
        Err(ExtractError::Io { .. })
    ));
}

#[test]
fn test_no_skills_leaves_job_list_as_is() {
    let jobs = vec![
        Job::new("B", &["rust"]),
        Job::new("A", &["python"]),
    ];
    let ranked = rank_jobs(&ExtractedSkillSet::new(), jobs.clone());
    assert_eq!(ranked, RankedJobList::Unranked(jobs));
}

#[test]
fn test_ranked_output_serializes_as_annotated_records() {
    let candidate: ExtractedSkillSet = ["python"].into_iter().collect();
    let mut job = Job::new("Data Engineer", &["Python", "Airflow"]);
    job.company = Some("Acme".to_string());

    let value = serde_json::to_value(rank_jobs(&candidate, vec![job.clone()])).unwrap();
    assert_eq!(
        value,
        json!([{
            "id": job.id,
            "title": "Data Engineer",
            "company": "Acme",
            "requiredSkills": ["Python", "Airflow"],
            "matchScore": 0.5,
            "isRecommended": true
        }])
    );
}

#[test]
fn test_pdf_pages_come_back_in_order() {
    let bytes = build_pdf(&["Python developer ", "Kubernetes admin"]);

    let text = extract_text_from_bytes(&bytes, "pdf").unwrap();
    let first = text.find("Python developer").expect("page 1 text");
    let second = text.find("Kubernetes admin").expect("page 2 text");
    assert!(first < second, "pages out of order: {text:?}");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, &bytes).unwrap();
    assert_eq!(extract_text(&path, "application/pdf").unwrap(), text);

    let skills = MatchEngine::default().skills_from_file(&path, "pdf").unwrap();
    assert!(skills.contains("python"));
    assert!(skills.contains("kubernetes"));
}

#[test]
fn test_docx_empty_run_does_not_leak_markup_into_skills() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "sparse.docx", &["", "Python"]);

    let text = extract_text(&path, "docx").unwrap();
    assert!(!text.contains('<'), "markup leaked: {text:?}");

    let skills = MatchEngine::default().skills_from_file(&path, "docx").unwrap();
    assert_eq!(skills.into_vec(), vec!["python"]);
}
