//! Fixed instruction templates, one per task kind.
//!
//! Each template takes the language directive as its first line. Templates
//! are plain `format!` calls so the payload is a pure function of the inputs.

pub(crate) const CHAT_CONTEXT_HEADER: &str = "CONTEXT DOCUMENTS:\n";

pub(crate) const CHAT_ACKNOWLEDGEMENT: &str =
    "I have acknowledged the context. I am ready to answer questions about it.";

pub(crate) const TRUNCATION_NOTICE: &str = " ... [truncated if too long]";

pub(crate) fn deep_summary(directive: &str, content: &str) -> String {
    format!(
        "{directive}\n\
         You are an elite strategic auditor and document intelligence agent.\n\
         \n\
         TASK: Create a comprehensive \"Masterpiece\" audit report of the following document content.\n\
         The report must be between 2000 and 3000 words.\n\
         \n\
         STRUCTURE:\n\
         1. Executive Summary\n\
         2. Comprehensive Detailed Analysis (Deep Dive)\n\
         3. Strategic SWOT Analysis (Strengths, Weaknesses, Opportunities, Threats)\n\
         4. Risk Assessment & Mitigation\n\
         5. Key Entities & Technical Data\n\
         6. Conclusion & Forward-Looking Statements\n\
         \n\
         FORMAT: Markdown. Use bolding for emphasis. Use tables for data.\n\
         \n\
         CONTENT TO ANALYZE:\n\
         {content}{TRUNCATION_NOTICE}\n"
    )
}

pub(crate) fn chat_system(directive: &str) -> String {
    format!(
        "You are AuditFlow AI, a helpful assistant.\n\
         Answer the user's question based STRICTLY on the provided Context.\n\
         If the answer is not in the context, say so.\n\
         {directive}\n"
    )
}

pub(crate) fn smart_replace(directive: &str, template: &str, data: &str, instruction: &str) -> String {
    format!(
        "{directive}\n\
         SYSTEM: You are a document automation engine.\n\
         TASK: Replace placeholders in the TEMPLATE using the DATA SOURCE.\n\
         USER INSTRUCTION: {instruction}\n\
         \n\
         TEMPLATE:\n\
         {template}\n\
         \n\
         DATA SOURCE:\n\
         {data}\n\
         \n\
         OUTPUT: Return only the filled document text.\n"
    )
}

pub(crate) fn note_transform(directive: &str, raw: &str) -> String {
    format!(
        "{directive}\n\
         You are an expert personal knowledge manager.\n\
         TASK: Take the raw, chaotic input text below and transform it into a highly organized, beautiful Markdown note.\n\
         \n\
         GUIDELINES:\n\
         - Use clear Headers (#, ##).\n\
         - Use Bullet points for lists.\n\
         - Bold key terms.\n\
         - Fix grammar and flow.\n\
         - Maintain the original meaning but make it professional and readable.\n\
         \n\
         RAW INPUT:\n\
         {raw}\n"
    )
}

pub(crate) fn note_magic(directive: &str, action: &str, note: &str) -> String {
    format!(
        "{directive}\n\
         SYSTEM: You are an AI Text Editor.\n\
         ACTION: {action}\n\
         \n\
         CURRENT NOTE:\n\
         {note}\n\
         \n\
         OUTPUT: Return the fully updated Markdown note.\n"
    )
}
