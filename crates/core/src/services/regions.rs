use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::EntropyError;
use crate::model::{AnalysisResult, FileKind, Measurement, Region};
use crate::services::detect::FileTypeDetector;
use crate::session::FileSession;

/// Trait implemented by structured-format adapters that enumerate regions.
pub trait RegionResolver: Send + Sync {
    /// Regions of `bytes` in resolver-defined order (file order for section tables).
    fn resolve(&self, bytes: &[u8]) -> Result<Vec<Region>, EntropyError>;
    fn kind(&self) -> FileKind;
    fn name(&self) -> &'static str;
}

/// Registry for region resolvers; callers select by detected kind.
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<FileKind, Box<dyn RegionResolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self { resolvers: HashMap::new() }
    }

    pub fn register<R: RegionResolver + 'static>(&mut self, resolver: R) -> &mut Self {
        self.resolvers.insert(resolver.kind(), Box::new(resolver));
        self
    }

    pub fn get(&self, kind: &FileKind) -> Option<&dyn RegionResolver> {
        self.resolvers.get(kind).map(|r| &**r)
    }

    /// Return a sorted list of registered resolver names for help output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.resolvers.values().map(|r| r.name().to_string()).collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

/// Running entropy for each region, in input order.
///
/// The first region that fails range validation aborts the batch.
pub fn analyze_regions(
    session: &FileSession,
    regions: &[Region],
    window_size: usize,
    normalize: bool,
) -> Result<Vec<AnalysisResult>, EntropyError> {
    regions
        .iter()
        .map(|region| {
            debug!(region = %region.name, offset = region.offset, length = region.length, "region");
            let series = session.running_entropy(
                window_size,
                normalize,
                region.offset,
                Some(region.length),
            )?;
            Ok(AnalysisResult {
                region: Some(region.clone()),
                window_size,
                normalized: normalize,
                measurement: Measurement::Series(series),
            })
        })
        .collect()
}

/// One aggregate entropy value per region, in input order. Fail-fast.
pub fn analyze_region_aggregates(
    session: &FileSession,
    regions: &[Region],
    normalize: bool,
) -> Result<Vec<AnalysisResult>, EntropyError> {
    regions
        .iter()
        .map(|region| {
            let value = session.region_entropy(region, normalize)?;
            Ok(AnalysisResult {
                region: Some(region.clone()),
                window_size: region.length,
                normalized: normalize,
                measurement: Measurement::Aggregate(value),
            })
        })
        .collect()
}

/// Per-region results together with how the regions were obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    pub kind: FileKind,
    pub resolver: String,
    pub results: Vec<AnalysisResult>,
}

/// Coordinator tying a detector to a resolver registry.
pub struct RegionAnalyzer<'a> {
    pub registry: &'a ResolverRegistry,
    pub detector: &'a dyn FileTypeDetector,
}

impl<'a> RegionAnalyzer<'a> {
    /// Detect the session's kind and enumerate its regions.
    ///
    /// Fails with `UnsupportedRegionAnalysis` when no resolver handles the kind.
    pub fn resolve(
        &self,
        session: &FileSession,
    ) -> Result<(FileKind, &'a dyn RegionResolver, Vec<Region>), EntropyError> {
        let kind = session.detect(self.detector);
        let Some(resolver) = self.registry.get(&kind) else {
            warn!(kind = %kind, "no region resolver registered; whole-file analysis only");
            return Err(EntropyError::UnsupportedRegionAnalysis(kind));
        };
        let regions = resolver.resolve(session.data())?;
        debug!(kind = %kind, resolver = resolver.name(), count = regions.len(), "resolved regions");
        Ok((kind, resolver, regions))
    }

    pub fn running_entropy(
        &self,
        session: &FileSession,
        window_size: usize,
        normalize: bool,
    ) -> Result<RegionReport, EntropyError> {
        let (kind, resolver, regions) = self.resolve(session)?;
        let results = analyze_regions(session, &regions, window_size, normalize)?;
        Ok(RegionReport { kind, resolver: resolver.name().to_string(), results })
    }

    pub fn entropy(
        &self,
        session: &FileSession,
        normalize: bool,
    ) -> Result<RegionReport, EntropyError> {
        let (kind, resolver, regions) = self.resolve(session)?;
        let results = analyze_region_aggregates(session, &regions, normalize)?;
        Ok(RegionReport { kind, resolver: resolver.name().to_string(), results })
    }
}

/// Convenience builder for a registry populated with the built-in resolvers.
pub fn default_resolver_registry() -> ResolverRegistry {
    #[allow(unused_mut)]
    let mut registry = ResolverRegistry::new();
    #[cfg(feature = "goblin-formats")]
    {
        registry.register(crate::services::resolvers::PeSectionResolver);
        registry.register(crate::services::resolvers::ElfSectionResolver);
        registry.register(crate::services::resolvers::MachOSectionResolver);
    }
    registry
}
