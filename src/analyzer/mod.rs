//! モック解析
//!
//! 一定時間待ってから決定的な解析結果を返すバックグラウンドタスク。
//! 新しい解析を始めると前のタスクは中断され、世代が進む。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use style_ai_common::{demo, LookAnalysis};
use tokio::task::{AbortHandle, JoinHandle};

/// 解析の結末
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Completed(LookAnalysis),
    /// 新しい解析に追い越された、または中断された
    Superseded,
}

#[derive(Debug)]
pub struct Analyzer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    running: Option<AbortHandle>,
}

impl Analyzer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            running: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// 解析を開始。実行中の解析があれば中断する
    pub fn start(&mut self, seed: u64) -> PendingAnalysis {
        self.cancel();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            demo::look_analysis(seed)
        });
        self.running = Some(handle.abort_handle());
        tracing::debug!(generation, seed, "analysis started");

        PendingAnalysis {
            generation,
            handle,
            current: Arc::clone(&self.generation),
        }
    }

    /// 実行中の解析を中断する
    pub fn cancel(&mut self) {
        if let Some(running) = self.running.take() {
            if !running.is_finished() {
                running.abort();
                tracing::debug!("analysis aborted");
            }
        }
    }
}

impl Drop for Analyzer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug)]
pub struct PendingAnalysis {
    generation: u64,
    handle: JoinHandle<LookAnalysis>,
    current: Arc<AtomicU64>,
}

impl PendingAnalysis {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 完了を待つ。世代が古ければ結果は捨てる
    pub async fn wait(self) -> AnalysisOutcome {
        match self.handle.await {
            Ok(analysis) if self.current.load(Ordering::SeqCst) == self.generation => {
                AnalysisOutcome::Completed(analysis)
            }
            Ok(_) => AnalysisOutcome::Superseded,
            Err(e) => {
                tracing::debug!(generation = self.generation, error = %e, "analysis task ended");
                AnalysisOutcome::Superseded
            }
        }
    }
}
