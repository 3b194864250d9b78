//! Gemini后端客户端
//!
//! 直接基于REST接口的类型化封装：文本审计走`generateContent`（带检索落地），
//! 图像与语音走内联载荷，视频走`predictLongRunning`长耗时操作加轮询下载。

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use futures::StreamExt;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::config::LLMConfig;
use crate::error::{AuditError, ProbeResult};
use crate::llm::{
    GenerationBackend, GenerationRequest, GenerationResponse, MediaBackend, VideoJob,
    VideoJobStatus,
};

/// Gemini REST客户端，同时承担文本生成与媒体生成
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: LLMConfig,
}

impl GeminiClient {
    /// 创建客户端；凭证缺失在这里立即失败，而不是等到第一次调用
    pub fn new(config: &LLMConfig) -> ProbeResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AuditError::Configuration(
                "backend API key is empty, set COMPETEAI_API_KEY or [llm].api_key".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AuditError::Configuration(format!("http client init failed: {}", e)))?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    fn model_endpoint(&self, model: &str, verb: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base_url.trim_end_matches('/'),
            model,
            verb
        )
    }

    async fn post_json(&self, url: &str, body: &Value) -> ProbeResult<reqwest::Response> {
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AuditError::Generation(format!(
                "backend returned {}: {}",
                status,
                truncate_detail(&detail)
            )));
        }
        Ok(response)
    }

    async fn generate_content(&self, model: &str, body: Value) -> ProbeResult<WireResponse> {
        let url = self.model_endpoint(model, "generateContent");
        let response = self.post_json(&url, &body).await?;
        let wire: WireResponse = response.json().await?;
        Ok(wire)
    }
}

/// 错误详情截断，避免把整页HTML错误刷进终端。
/// 后端错误体可能是本地化文本，截断点必须落在字符边界上。
fn truncate_detail(detail: &str) -> String {
    const LIMIT: usize = 512;
    if detail.len() <= LIMIT {
        return detail.to_string();
    }
    let mut end = LIMIT;
    while !detail.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &detail[..end])
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> ProbeResult<GenerationResponse> {
        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "temperature": self.config.temperature,
            "thinkingConfig": { "thinkingBudget": self.config.thinking_budget },
        });
        if let Some(schema) = &request.response_schema {
            generation_config["responseSchema"] = schema.clone();
        }

        let mut body = json!({
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "contents": [{ "parts": [{ "text": request.user_prompt }] }],
            "generationConfig": generation_config,
        });
        if request.grounding {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }

        let wire = self.generate_content(&self.config.model_audit, body).await?;

        let candidate = wire
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AuditError::Generation("backend returned no candidates".to_string()))?;

        let text = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        let source_urls = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web.and_then(|web| web.uri))
                    .collect()
            })
            .unwrap_or_default();

        Ok(GenerationResponse { text, source_urls })
    }
}

#[async_trait]
impl MediaBackend for GeminiClient {
    async fn generate_image(&self, prompt: &str, aspect_ratio: &str) -> ProbeResult<String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "imageConfig": { "aspectRatio": aspect_ratio },
            },
        });

        let wire = self
            .generate_content(&self.config.model_image, body)
            .await
            .map_err(into_media_error)?;

        first_inline_data_uri(&wire, "image/png")
            .ok_or_else(|| AuditError::MediaGeneration("no inline image in response".to_string()))
    }

    async fn generate_speech(&self, text: &str, voice: &str) -> ProbeResult<String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": voice } }
                },
            },
        });

        let wire = self
            .generate_content(&self.config.model_speech, body)
            .await
            .map_err(into_media_error)?;

        first_inline_data_uri(&wire, "audio/wav")
            .ok_or_else(|| AuditError::MediaGeneration("no inline audio in response".to_string()))
    }

    async fn submit_video(&self, prompt: &str, resolution: &str) -> ProbeResult<VideoJob> {
        let url = self.model_endpoint(&self.config.model_video, "predictLongRunning");
        let body = json!({
            "instances": [{ "prompt": prompt }],
            "parameters": { "resolution": resolution },
        });

        let response = self.post_json(&url, &body).await.map_err(into_media_error)?;
        let operation: WireOperation = response
            .json()
            .await
            .map_err(|e| AuditError::MediaGeneration(format!("bad operation payload: {}", e)))?;

        Ok(VideoJob {
            operation_name: operation.name,
        })
    }

    async fn poll_video(&self, job: &VideoJob) -> ProbeResult<VideoJobStatus> {
        let url = format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            job.operation_name
        );

        let response = self
            .http
            .get(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| AuditError::MediaGeneration(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AuditError::MediaGeneration(format!(
                "operation poll returned {}: {}",
                status,
                truncate_detail(&detail)
            )));
        }

        let operation: WireOperation = response
            .json()
            .await
            .map_err(|e| AuditError::MediaGeneration(format!("bad operation payload: {}", e)))?;

        if let Some(error) = operation.error {
            return Ok(VideoJobStatus::Failed(error.message));
        }
        if !operation.done {
            return Ok(VideoJobStatus::Running);
        }

        Ok(VideoJobStatus::Done {
            asset_uri: operation.response.as_ref().and_then(extract_video_uri),
        })
    }

    async fn download_asset(&self, uri: &str, dest: &Path) -> ProbeResult<PathBuf> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AuditError::MediaGeneration(format!("assets dir: {}", e)))?;
        }

        let response = self
            .http
            .get(uri)
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| AuditError::MediaGeneration(format!("asset download: {}", e)))?;

        if !response.status().is_success() {
            return Err(AuditError::MediaGeneration(format!(
                "asset download returned {}",
                response.status()
            )));
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| AuditError::MediaGeneration(format!("asset file: {}", e)))?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AuditError::MediaGeneration(format!("asset stream: {}", e)))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| AuditError::MediaGeneration(format!("asset file: {}", e)))?;
        }
        file.flush()
            .await
            .map_err(|e| AuditError::MediaGeneration(format!("asset file: {}", e)))?;

        Ok(dest.to_path_buf())
    }
}

fn into_media_error(err: AuditError) -> AuditError {
    match err {
        AuditError::Generation(msg) => AuditError::MediaGeneration(msg),
        other => other,
    }
}

/// 取第一个内联二进制part并包装为data URI
fn first_inline_data_uri(wire: &WireResponse, default_mime: &str) -> Option<String> {
    for candidate in &wire.candidates {
        for part in &candidate.content.parts {
            if let Some(inline) = &part.inline_data {
                let mime = if inline.mime_type.is_empty() {
                    default_mime
                } else {
                    inline.mime_type.as_str()
                };
                // 后端已按base64编码内联数据；重编码一次以剔除换行等填充差异
                let normalized = BASE64
                    .decode(inline.data.as_bytes())
                    .map(|raw| BASE64.encode(raw))
                    .unwrap_or_else(|_| inline.data.clone());
                return Some(format!("data:{};base64,{}", mime, normalized));
            }
        }
    }
    None
}

/// 在操作响应里探测视频产物URI（两代返回结构都兼容）
fn extract_video_uri(response: &Value) -> Option<String> {
    const PROBES: [&str; 2] = [
        "/generateVideoResponse/generatedSamples/0/video/uri",
        "/generateVideoResponse/generatedVideos/0/video/uri",
    ];
    PROBES
        .iter()
        .find_map(|pointer| response.pointer(pointer))
        .and_then(|value| value.as_str())
        .map(|uri| uri.to_string())
}

// ---- 线格式 ----

#[derive(Debug, Default, Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    #[serde(default)]
    content: WireContent,
    #[serde(default)]
    grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct WireContent {
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<WireInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireInlineData {
    #[serde(default)]
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct WireGroundingChunk {
    #[serde(default)]
    web: Option<WireWebSource>,
}

#[derive(Debug, Deserialize)]
struct WireWebSource {
    #[serde(default)]
    uri: Option<String>,
}

/// 长耗时操作的轮询载荷
#[derive(Debug, Deserialize)]
struct WireOperation {
    name: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<WireOperationError>,
    #[serde(default)]
    response: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct WireOperationError {
    #[serde(default)]
    message: String,
}
