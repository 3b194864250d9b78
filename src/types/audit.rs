use serde::{Deserialize, Serialize};

/// SWOT四象限数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwotData {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub threats: Vec<String>,
}

/// 销售作战卡数据（制胜打法、常见异议、探索性提问）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlecardData {
    #[serde(default)]
    pub how_to_win: Vec<String>,
    #[serde(default)]
    pub common_objections: Vec<String>,
    #[serde(default)]
    pub discovery_questions: Vec<String>,
}

/// 功能差距条目的三态可用性
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureStatus {
    Available,
    Limited,
    #[default]
    Missing,
}

impl FeatureStatus {
    /// 对后端返回的状态字符串做大小写不敏感的归类。
    /// "yes"等价于available，"partial"/"beta"等价于limited，
    /// 其余一律落到missing（包含未来未识别的新状态词）。
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "available" | "yes" => FeatureStatus::Available,
            "limited" | "partial" | "beta" => FeatureStatus::Limited,
            _ => FeatureStatus::Missing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureStatus::Available => "available",
            FeatureStatus::Limited => "limited",
            FeatureStatus::Missing => "missing",
        }
    }
}

impl std::fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 功能差距矩阵中的一行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureGapEntry {
    pub feature: String,
    pub status: FeatureStatus,
    pub description: String,
}

/// 某一类别的舆情分析（得分0-100，附具体抱怨点）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub category: String,
    pub score: u8,
    #[serde(default)]
    pub gripes: Vec<String>,
}

/// 规整后的报告主体：除id、时间戳与可选媒体字段外的全部内容。
/// 字段规整器保证其中每个列表字段都是真实列表、每个字符串字段非空。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditCore {
    pub company_name: String,
    pub industry: String,
    pub summary: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub swot: SwotData,
    #[serde(default)]
    pub battlecard: BattlecardData,
    #[serde(default)]
    pub feature_gap: Vec<FeatureGapEntry>,
    #[serde(default)]
    pub sentiment: Vec<SentimentAnalysis>,
}

/// 可选媒体字段标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaField {
    Visual,
    Audio,
    Video,
}

impl MediaField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaField::Visual => "visualUrl",
            MediaField::Audio => "audioUrl",
            MediaField::Video => "videoUrl",
        }
    }
}

/// 一份完整的竞对审计报告
///
/// 除三个可选媒体字段外不可变；媒体字段只允许从缺失变为存在，
/// 一旦写入便不再覆盖（每种媒体对每条记录至多生成一次）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub id: String,
    pub domain: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_urls: Option<Vec<String>>,
    #[serde(flatten)]
    pub core: AuditCore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl AuditResult {
    /// 各舆情类别得分的平均值；空列表返回0，避免除零
    pub fn average_sentiment(&self) -> u8 {
        let sentiment = &self.core.sentiment;
        if sentiment.is_empty() {
            return 0;
        }
        let total: u32 = sentiment.iter().map(|s| s.score as u32).sum();
        (total / sentiment.len() as u32) as u8
    }

    pub fn media_url(&self, field: MediaField) -> Option<&str> {
        match field {
            MediaField::Visual => self.visual_url.as_deref(),
            MediaField::Audio => self.audio_url.as_deref(),
            MediaField::Video => self.video_url.as_deref(),
        }
    }

    /// 写入媒体字段。首次写入生效并返回true；
    /// 字段已存在时不做任何改动并返回false（先写者胜）。
    pub fn set_media_url(&mut self, field: MediaField, value: String) -> bool {
        let slot = match field {
            MediaField::Visual => &mut self.visual_url,
            MediaField::Audio => &mut self.audio_url,
            MediaField::Video => &mut self.video_url,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }
}
