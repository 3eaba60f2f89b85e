//! System prompts and user-prompt rendering for every dispatch kind.
//!
//! Rendering is pure: it never touches the network or configuration, so each
//! kind can be checked in isolation.

use std::fmt;

use crate::message::{BusinessContext, DispatchRequest};

pub const CONTENT_SYSTEM_PROMPT: &str = "You are a social media content expert. Generate engaging, platform-specific content that drives engagement. Be creative, use emojis appropriately, and keep content concise yet impactful. Return ONLY the post content without any explanations.";

pub const HASHTAGS_SYSTEM_PROMPT: &str = "You are a hashtag optimization expert. Generate relevant, trending hashtags that maximize reach and engagement. Return ONLY hashtags separated by spaces, nothing else.";

pub const SCHEDULE_SYSTEM_PROMPT: &str = "You are a social media scheduling expert. Analyze the best posting times based on platform and audience engagement patterns. Return a JSON object with recommended times.";

pub const LEAD_SCORE_SYSTEM_PROMPT: &str = "You are a sales intelligence expert. Analyze lead data and provide a score from 0-100 based on potential value, engagement likelihood, and conversion probability. Return ONLY a JSON object with score and brief reasoning.";

pub const RECORD_ANALYSIS_SYSTEM_PROMPT: &str = "You are a small business financial and operations analyst. Review business records and give practical, specific insights: what stands out, what risks exist, and what the owner should do next. Be concise and avoid generic advice.";

pub const EXTRACT_LEAD_SYSTEM_PROMPT: &str = "You are a lead qualification assistant. Extract contact details and purchase intent from social media messages. Never invent details that are not present in the message; use null for anything unknown. Return ONLY a JSON object.";

pub const GENERATE_CAMPAIGN_SYSTEM_PROMPT: &str = "You are a senior digital marketing strategist. Design focused, multi-platform marketing campaigns with clear objectives, audience targeting, content pillars, a posting cadence, and measurable KPIs. Keep plans realistic for a small business budget.";

pub const SWOT_ANALYSIS_SYSTEM_PROMPT: &str = "You are a business strategy consultant. Produce a SWOT analysis grounded in the business profile you are given. Each item must be a short, specific sentence. Return ONLY a JSON object.";

pub const BUSINESS_CONSULTANT_SYSTEM_PROMPT: &str = "You are an experienced small business consultant covering marketing, sales, operations, and finance. Tailor every answer to the business profile you are given, and keep recommendations concise and actionable.";

pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant for social media management. Help users with content ideas, strategy, analytics interpretation, and marketing advice. Be concise and actionable.";

const DEFAULT_CONTENT_PROMPT: &str = "Create an engaging social media post";
const DEFAULT_HASHTAGS_PROMPT: &str = "Generate trending hashtags for social media marketing";
const DEFAULT_SCHEDULE_PROMPT: &str = "Suggest optimal posting times for maximum engagement";
const DEFAULT_LEAD_SCORE_PROMPT: &str = "Analyze lead potential";
const DEFAULT_RECORD_ANALYSIS_PROMPT: &str = "Analyze my recent business records and suggest improvements";
const DEFAULT_EXTRACT_LEAD_PROMPT: &str = "Extract lead information from the latest customer message";
const DEFAULT_GENERATE_CAMPAIGN_PROMPT: &str = "Create a 30-day marketing campaign to grow sales and brand awareness";
const DEFAULT_SWOT_ANALYSIS_PROMPT: &str = "Perform a SWOT analysis for a small online business";
const DEFAULT_BUSINESS_CONSULTANT_PROMPT: &str = "What are the top three things I should focus on to grow my business this quarter?";
const DEFAULT_CHAT_PROMPT: &str = "How can I improve my social media presence?";

/// Tag selecting which template a request is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    Content,
    Hashtags,
    Schedule,
    LeadScore,
    RecordAnalysis,
    ExtractLead,
    GenerateCampaign,
    SwotAnalysis,
    BusinessConsultant,
    Chat,
}

impl DispatchKind {
    pub const ALL: [DispatchKind; 10] = [
        DispatchKind::Content,
        DispatchKind::Hashtags,
        DispatchKind::Schedule,
        DispatchKind::LeadScore,
        DispatchKind::RecordAnalysis,
        DispatchKind::ExtractLead,
        DispatchKind::GenerateCampaign,
        DispatchKind::SwotAnalysis,
        DispatchKind::BusinessConsultant,
        DispatchKind::Chat,
    ];

    /// Resolve a wire tag. Missing or unknown tags resolve to `Chat`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("content") => Self::Content,
            Some("hashtags") => Self::Hashtags,
            Some("schedule") => Self::Schedule,
            Some("lead_score") => Self::LeadScore,
            Some("record_analysis") => Self::RecordAnalysis,
            Some("extract_lead") => Self::ExtractLead,
            Some("generate_campaign") => Self::GenerateCampaign,
            Some("swot_analysis") => Self::SwotAnalysis,
            Some("business_consultant") => Self::BusinessConsultant,
            _ => Self::Chat,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Hashtags => "hashtags",
            Self::Schedule => "schedule",
            Self::LeadScore => "lead_score",
            Self::RecordAnalysis => "record_analysis",
            Self::ExtractLead => "extract_lead",
            Self::GenerateCampaign => "generate_campaign",
            Self::SwotAnalysis => "swot_analysis",
            Self::BusinessConsultant => "business_consultant",
            Self::Chat => "chat",
        }
    }

    /// Whether client-supplied history is replayed between the system and user prompts.
    pub fn is_conversational(&self) -> bool {
        matches!(self, Self::Chat | Self::BusinessConsultant)
    }
}

impl fmt::Display for DispatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: &'static str,
    pub user: String,
}

/// Render the system and user prompt for `kind`.
pub fn render(kind: DispatchKind, request: &DispatchRequest) -> RenderedPrompt {
    RenderedPrompt {
        system: system_prompt(kind),
        user: user_prompt(kind, request),
    }
}

pub fn system_prompt(kind: DispatchKind) -> &'static str {
    match kind {
        DispatchKind::Content => CONTENT_SYSTEM_PROMPT,
        DispatchKind::Hashtags => HASHTAGS_SYSTEM_PROMPT,
        DispatchKind::Schedule => SCHEDULE_SYSTEM_PROMPT,
        DispatchKind::LeadScore => LEAD_SCORE_SYSTEM_PROMPT,
        DispatchKind::RecordAnalysis => RECORD_ANALYSIS_SYSTEM_PROMPT,
        DispatchKind::ExtractLead => EXTRACT_LEAD_SYSTEM_PROMPT,
        DispatchKind::GenerateCampaign => GENERATE_CAMPAIGN_SYSTEM_PROMPT,
        DispatchKind::SwotAnalysis => SWOT_ANALYSIS_SYSTEM_PROMPT,
        DispatchKind::BusinessConsultant => BUSINESS_CONSULTANT_SYSTEM_PROMPT,
        DispatchKind::Chat => CHAT_SYSTEM_PROMPT,
    }
}

pub fn user_prompt(kind: DispatchKind, request: &DispatchRequest) -> String {
    match kind {
        DispatchKind::Content => render_content(request),
        DispatchKind::Hashtags => render_hashtags(request),
        DispatchKind::Schedule => render_schedule(request),
        DispatchKind::LeadScore => render_lead_score(request),
        DispatchKind::RecordAnalysis => render_record_analysis(request),
        DispatchKind::ExtractLead => render_extract_lead(request),
        DispatchKind::GenerateCampaign => render_generate_campaign(request),
        DispatchKind::SwotAnalysis => render_swot_analysis(request),
        DispatchKind::BusinessConsultant => render_business_consultant(request),
        DispatchKind::Chat => render_chat(request),
    }
}

fn prompt_or(request: &DispatchRequest, default: &str) -> String {
    request.prompt_text().unwrap_or(default).to_string()
}

fn render_content(request: &DispatchRequest) -> String {
    match &request.post_data {
        Some(post) => format!(
            "Create a {} social media post for {} about: {}",
            post.tone.as_deref().filter(|t| !t.is_empty()).unwrap_or("professional"),
            post.platform,
            post.topic
        ),
        None => prompt_or(request, DEFAULT_CONTENT_PROMPT),
    }
}

fn render_hashtags(request: &DispatchRequest) -> String {
    prompt_or(request, DEFAULT_HASHTAGS_PROMPT)
}

fn render_schedule(request: &DispatchRequest) -> String {
    match &request.post_data {
        Some(post) => format!(
            r#"Suggest optimal posting times for {} for content about {}. Return JSON with format: {{ "times": ["HH:MM AM/PM"], "days": ["day"], "reason": "explanation" }}"#,
            post.platform, post.topic
        ),
        None => prompt_or(request, DEFAULT_SCHEDULE_PROMPT),
    }
}

fn render_lead_score(request: &DispatchRequest) -> String {
    let Some(lead) = &request.lead_data else {
        return prompt_or(request, DEFAULT_LEAD_SCORE_PROMPT);
    };

    let value = lead.value.map(|v| format!("${v}"));
    format!(
        r#"Score this lead: Name: {}, Company: {}, Source: {}, Potential Value: {}. Return JSON: {{ "score": number, "reason": "brief explanation", "priority": "high/medium/low" }}"#,
        lead.name,
        or_na(lead.company.as_deref()),
        or_na(lead.source.as_deref()),
        or_na(value.as_deref()),
    )
}

fn render_record_analysis(request: &DispatchRequest) -> String {
    let Some(record) = &request.record_data else {
        return prompt_or(request, DEFAULT_RECORD_ANALYSIS_PROMPT);
    };

    let amount = record.amount.map(|a| format!("${a}"));
    format!(
        "Analyze this business record: Type: {}, Title: {}, Description: {}, Amount: {}, Category: {}. Provide key insights, potential risks, and recommended next actions in under 150 words.",
        record.record_type,
        record.title,
        or_na(record.description.as_deref()),
        or_na(amount.as_deref()),
        or_na(record.category.as_deref()),
    )
}

fn render_extract_lead(request: &DispatchRequest) -> String {
    let Some(message) = &request.message_data else {
        return prompt_or(request, DEFAULT_EXTRACT_LEAD_PROMPT);
    };

    format!(
        r#"Extract lead information from this {} message sent by {}: "{}". Return JSON: {{ "name": string or null, "email": string or null, "phone": string or null, "company": string or null, "interest": "what they want", "intent": "high/medium/low" }}"#,
        message.platform,
        message.contact_name.as_deref().filter(|n| !n.is_empty()).unwrap_or("an unknown contact"),
        or_na(message.content.as_deref())
    )
}

fn render_generate_campaign(request: &DispatchRequest) -> String {
    let Some(business) = &request.business_data else {
        return prompt_or(request, DEFAULT_GENERATE_CAMPAIGN_PROMPT);
    };

    let goals = if business.goals.is_empty() {
        "grow sales".to_string()
    } else {
        business.goals.join(", ")
    };
    let budget = business.budget.map(|b| format!("${b}"));

    let mut out = format!(
        "Create a 30-day marketing campaign for a {} business. Goals: {}. Budget: {}. Target audience: {}.",
        business.industry.as_deref().unwrap_or("small"),
        goals,
        or_na(budget.as_deref()),
        or_na(business.target_audience.as_deref()),
    );
    out.push_str(" Include the campaign name, objective, platforms, content pillars, a weekly posting plan, and KPIs.");

    // An explicit prompt refines the generated campaign instead of replacing it.
    if let Some(extra) = request.prompt_text() {
        out.push_str(" Additional instructions: ");
        out.push_str(extra);
    }
    out
}

fn render_swot_analysis(request: &DispatchRequest) -> String {
    let Some(profile) = &request.business_context else {
        return prompt_or(request, DEFAULT_SWOT_ANALYSIS_PROMPT);
    };

    format!(
        r#"Perform a SWOT analysis for this business: {}. Return JSON: {{ "strengths": ["..."], "weaknesses": ["..."], "opportunities": ["..."], "threats": ["..."] }}"#,
        describe_business(profile)
    )
}

fn render_business_consultant(request: &DispatchRequest) -> String {
    let question = prompt_or(request, DEFAULT_BUSINESS_CONSULTANT_PROMPT);
    match &request.business_context {
        Some(profile) => format!("Business profile: {}.\n\nQuestion: {}", describe_business(profile), question),
        None => question,
    }
}

fn render_chat(request: &DispatchRequest) -> String {
    prompt_or(request, DEFAULT_CHAT_PROMPT)
}

/// One-line description of a business profile; unknown fields are skipped.
pub fn describe_business(profile: &BusinessContext) -> String {
    let fields = [
        ("Name", profile.business_name.as_deref()),
        ("Industry", profile.industry.as_deref()),
        ("Description", profile.description.as_deref()),
        ("Target audience", profile.target_audience.as_deref()),
        ("Location", profile.location.as_deref()),
    ];

    let parts: Vec<String> = fields
        .iter()
        .filter_map(|(label, value)| value.filter(|v| !v.trim().is_empty()).map(|v| format!("{label}: {v}")))
        .collect();

    if parts.is_empty() {
        "a small business with no profile details provided".to_string()
    } else {
        parts.join(", ")
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("N/A")
}
