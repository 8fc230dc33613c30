//! AIプロンプト

/// Bio推敲の既定トーン
pub const DEFAULT_BIO_TONE: &str = "sophisticated";

/// 写真キャプション生成プロンプト
pub const CAPTION_PROMPT: &str = "Analyze this photograph. Provide a short, artistic title (max 5 words) and a poetic, minimalist description (1 sentence) suitable for a high-end photography portfolio. Return ONLY a valid JSON object with keys 'title' and 'description'. Do not include markdown formatting.";

/// Bio推敲プロンプトを生成
pub fn build_bio_prompt(current_bio: &str, tone: &str) -> String {
    format!(
        "Rewrite the following photographer biography to be more {}, minimalist, and professional. Keep it concise (under 100 words). \n\nOriginal Bio: {}",
        tone, current_bio
    )
}
