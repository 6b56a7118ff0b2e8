//! 存储键派生
//!
//! 落盘文件名格式：`{kind}_{parent_id}_{actor_id}_{timestamp}_{orig_name}`，
//! 其中 kind 区分作业附件和学生提交，parent 为所属作业/课程 ID。
//! 原始文件名会被清洗，避免路径分隔符逃出存储目录。

/// 派生落盘文件名
pub fn blob_key(kind: &str, parent_id: i64, actor_id: i64, orig_name: &str) -> String {
    let ts = chrono::Utc::now().timestamp();
    format!(
        "{kind}_{parent_id}_{actor_id}_{ts}_{}",
        sanitize_file_name(orig_name)
    )
}

/// 清洗原始文件名：去掉路径部分，替换分隔符
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect()
}

/// 检查文件名是否带 .pdf 扩展名（仅扩展名检查，不做内容嗅探）
pub fn has_pdf_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_key_format() {
        let key = blob_key("assignment", 3, 7, "syllabus.pdf");
        assert!(key.starts_with("assignment_3_7_"));
        assert!(key.ends_with("_syllabus.pdf"));
    }

    #[test]
    fn test_sanitize_strips_paths() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("dir\\evil.pdf"), "evil.pdf");
        assert_eq!(sanitize_file_name("plain.pdf"), "plain.pdf");
    }

    #[test]
    fn test_pdf_extension() {
        assert!(has_pdf_extension("notes.PDF"));
        assert!(has_pdf_extension("a.b.pdf"));
        assert!(!has_pdf_extension("notes.docx"));
        assert!(!has_pdf_extension("pdf"));
    }
}
