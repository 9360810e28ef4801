/// Posture for the capability check (class must derive from the reactive base).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityPolicy {
    /// Missing capability is a warning; properties are still generated.
    Lenient,
    /// Missing capability is an error; the class emits no fragment.
    Strict,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub capability_policy: CapabilityPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            capability_policy: CapabilityPolicy::Lenient,
        }
    }
}
// 生成配置仅保留能力检查姿态；字段级失败策略固定为宽松（逐字段）。
