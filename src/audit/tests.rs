#[cfg(test)]
mod tests {
    use crate::audit::{normalize_domain, run_audit};
    use crate::config::{Config, FALLBACK_VISUAL_URL};
    use crate::error::{AuditError, ProbeResult};
    use crate::llm::{
        GenerationBackend, GenerationRequest, GenerationResponse, MediaBackend, VideoJob,
        VideoJobStatus,
    };
    use crate::workflow::context::ProbeContext;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    /// 回放预设响应的文本生成后端，同时记录收到的请求
    struct ScriptedGeneration {
        response: ProbeResult<GenerationResponse>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedGeneration {
        fn ok(text: &str, source_urls: Vec<String>) -> Self {
            Self {
                response: Ok(GenerationResponse {
                    text: text.to_string(),
                    source_urls,
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(AuditError::Generation(message.to_string())),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedGeneration {
        async fn generate(&self, request: &GenerationRequest) -> ProbeResult<GenerationResponse> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(AuditError::Generation(msg)) => Err(AuditError::Generation(msg.clone())),
                Err(_) => unreachable!(),
            }
        }
    }

    /// 头图生成可控成败的媒体后端
    struct StubMedia {
        image_fails: bool,
    }

    #[async_trait]
    impl MediaBackend for StubMedia {
        async fn generate_image(&self, prompt: &str, _aspect_ratio: &str) -> ProbeResult<String> {
            if self.image_fails {
                return Err(AuditError::MediaGeneration("image backend down".to_string()));
            }
            Ok(format!("data:image/png;base64,{}", prompt.len()))
        }

        async fn generate_speech(&self, _text: &str, _voice: &str) -> ProbeResult<String> {
            unreachable!("not used in audit tests")
        }

        async fn submit_video(&self, _prompt: &str, _resolution: &str) -> ProbeResult<VideoJob> {
            unreachable!("not used in audit tests")
        }

        async fn poll_video(&self, _job: &VideoJob) -> ProbeResult<VideoJobStatus> {
            unreachable!("not used in audit tests")
        }

        async fn download_asset(&self, _uri: &str, _dest: &Path) -> ProbeResult<PathBuf> {
            unreachable!("not used in audit tests")
        }
    }

    fn test_context(generation: ScriptedGeneration, media: StubMedia) -> ProbeContext {
        ProbeContext::with_backends(Config::default(), Arc::new(generation), Arc::new(media))
    }

    const FULL_PAYLOAD: &str = r#"Here is the forensic report you asked for:
{
    "companyName": "Acme",
    "industry": "Widgets",
    "summary": "Acme dominates the widget market.",
    "techStack": ["Fastly", "React"],
    "swot": {
        "strengths": ["brand"],
        "weaknesses": ["pricing"],
        "opportunities": ["apac"],
        "threats": ["churn"]
    },
    "battlecard": {
        "howToWin": ["lead with speed"],
        "commonObjections": ["too new"],
        "discoveryQuestions": ["how long are deploys?"]
    },
    "featureGap": [
        {"feature": "SSO", "status": "limited", "description": "SAML only"}
    ],
    "sentiment": [
        {"category": "Product", "score": 80, "gripes": ["slow search"]}
    ]
}
Hope this helps."#;

    #[test]
    fn test_normalize_domain_strips_scheme_www_and_path() {
        assert_eq!(normalize_domain("https://www.Example.com/pricing"), "example.com");
        assert_eq!(normalize_domain("http://acme.io"), "acme.io");
        assert_eq!(normalize_domain("WWW.ACME.IO/a/b"), "acme.io");
        assert_eq!(normalize_domain("  acme.io  "), "acme.io");
        // 裸域名原样（小写）通过
        assert_eq!(normalize_domain("sub.acme.io"), "sub.acme.io");
    }

    #[tokio::test]
    async fn test_run_audit_builds_full_record() {
        let generation = ScriptedGeneration::ok(
            FULL_PAYLOAD,
            vec!["https://news.example.com/a".to_string()],
        );
        let context = test_context(generation, StubMedia { image_fails: false });

        let record = run_audit(&context, "https://www.Acme.com/about")
            .await
            .unwrap();

        assert_eq!(record.domain, "acme.com");
        assert_eq!(record.core.company_name, "Acme");
        assert_eq!(record.core.industry, "Widgets");
        assert_eq!(record.core.tech_stack, vec!["Fastly", "React"]);
        assert_eq!(
            record.source_urls,
            Some(vec!["https://news.example.com/a".to_string()])
        );
        // 审计阶段只补头图，音视频留待后续增补
        assert!(record.visual_url.as_deref().unwrap().starts_with("data:image/"));
        assert!(record.audio_url.is_none());
        assert!(record.video_url.is_none());
        assert!(!record.id.is_empty());
        assert!(!record.timestamp.is_empty());
    }

    #[tokio::test]
    async fn test_run_audit_sends_grounded_schema_request() {
        let generation = Arc::new(ScriptedGeneration::ok(FULL_PAYLOAD, vec![]));
        let context = ProbeContext::with_backends(
            Config::default(),
            generation.clone(),
            Arc::new(StubMedia { image_fails: false }),
        );

        run_audit(&context, "acme.com").await.unwrap();

        let requests = generation.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(request.grounding);
        assert!(request.response_schema.is_some());
        assert!(request.system_instruction.contains("Forensic Intelligence"));
        assert!(request.user_prompt.contains("acme.com"));
    }

    #[tokio::test]
    async fn test_run_audit_partial_payload_gets_defaults() {
        // swot只有strengths，battlecard整体缺失
        let partial = r#"{
            "companyName": "Acme",
            "swot": { "strengths": ["brand"] }
        }"#;
        let generation = ScriptedGeneration::ok(partial, vec![]);
        let context = test_context(generation, StubMedia { image_fails: false });

        let record = run_audit(&context, "acme.com").await.unwrap();

        assert_eq!(record.core.swot.strengths, vec!["brand"]);
        assert!(record.core.swot.weaknesses.is_empty());
        assert!(record.core.battlecard.how_to_win.is_empty());
        assert_eq!(record.core.industry, "General Industry");
        assert_eq!(record.source_urls, None);
    }

    #[tokio::test]
    async fn test_run_audit_prose_only_is_extraction_error() {
        let generation =
            ScriptedGeneration::ok("I could not find structured data for this domain.", vec![]);
        let context = test_context(generation, StubMedia { image_fails: false });

        let err = run_audit(&context, "acme.com").await.unwrap_err();
        assert!(matches!(err, AuditError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_run_audit_image_failure_falls_back_to_static_url() {
        let generation = ScriptedGeneration::ok(FULL_PAYLOAD, vec![]);
        let context = test_context(generation, StubMedia { image_fails: true });

        let record = run_audit(&context, "acme.com").await.unwrap();
        assert_eq!(record.visual_url.as_deref(), Some(FALLBACK_VISUAL_URL));
    }

    #[tokio::test]
    async fn test_run_audit_visual_disabled_skips_image_call() {
        let generation = ScriptedGeneration::ok(FULL_PAYLOAD, vec![]);
        let mut context = test_context(generation, StubMedia { image_fails: true });
        context.config.media.enable_visual = false;

        let record = run_audit(&context, "acme.com").await.unwrap();
        assert!(record.visual_url.is_none());
    }

    #[tokio::test]
    async fn test_run_audit_rejects_hostless_domain() {
        // 归一后没有主机名的输入在发起任何后端调用前就被拒绝
        for raw in ["https://", "www.", "  ", "http://www./pricing"] {
            let generation = ScriptedGeneration::failing("must not be called");
            let context = test_context(generation, StubMedia { image_fails: false });

            let err = run_audit(&context, raw).await.unwrap_err();
            assert!(matches!(err, AuditError::Configuration(_)), "input: {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_run_audit_generation_failure_propagates() {
        let generation = ScriptedGeneration::failing("backend unavailable");
        let context = test_context(generation, StubMedia { image_fails: false });

        let err = run_audit(&context, "acme.com").await.unwrap_err();
        match err {
            AuditError::Generation(message) => assert_eq!(message, "backend unavailable"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
