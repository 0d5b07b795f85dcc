//! Extension entry points resolved once per successful scan.

use tracing::{debug, warn};

use crate::gl_info::{Feature, FeatureSet};
use crate::platform::{GlPlatform, ProcAddress};

macro_rules! procs {
    ($($variant:ident => ($name:literal, $feature:ident),)*) => {
        /// Extension entry points the translation layer calls.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum GlProc {
            $($variant,)*
        }

        impl GlProc {
            pub const ALL: &'static [GlProc] = &[$(GlProc::$variant,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(GlProc::$variant => $name,)*
                }
            }

            /// The extension that must be present for this entry point to be usable.
            pub fn required_feature(self) -> Feature {
                match self {
                    $(GlProc::$variant => Feature::$feature,)*
                }
            }
        }
    };
}

procs! {
    ActiveTextureArb => ("glActiveTextureARB", ArbMultitexture),
    ClientActiveTextureArb => ("glClientActiveTextureARB", ArbMultitexture),
    MultiTexCoord4fArb => ("glMultiTexCoord4fARB", ArbMultitexture),
    PointParameterfArb => ("glPointParameterfARB", ArbPointParameters),
    PointParameterfvArb => ("glPointParameterfvARB", ArbPointParameters),
    PointParameterfExt => ("glPointParameterfEXT", ExtPointParameters),
    PointParameterfvExt => ("glPointParameterfvEXT", ExtPointParameters),
    SecondaryColor3fExt => ("glSecondaryColor3fEXT", ExtSecondaryColor),
    SecondaryColorPointerExt => ("glSecondaryColorPointerEXT", ExtSecondaryColor),
    FogCoordfExt => ("glFogCoordfEXT", ExtFogCoord),
    FogCoordPointerExt => ("glFogCoordPointerEXT", ExtFogCoord),
    GenProgramsArb => ("glGenProgramsARB", ArbVertexProgram),
    BindProgramArb => ("glBindProgramARB", ArbVertexProgram),
    ProgramStringArb => ("glProgramStringARB", ArbVertexProgram),
    ProgramEnvParameter4fvArb => ("glProgramEnvParameter4fvARB", ArbVertexProgram),
    DeleteProgramsArb => ("glDeleteProgramsARB", ArbVertexProgram),
    GenQueriesArb => ("glGenQueriesARB", ArbOcclusionQuery),
    BeginQueryArb => ("glBeginQueryARB", ArbOcclusionQuery),
    EndQueryArb => ("glEndQueryARB", ArbOcclusionQuery),
    GetQueryObjectuivArb => ("glGetQueryObjectuivARB", ArbOcclusionQuery),
    CompressedTexImage2dArb => ("glCompressedTexImage2DARB", ArbTextureCompression),
    ActiveStencilFaceExt => ("glActiveStencilFaceEXT", ExtStencilTwoSide),
    GenFramebuffersExt => ("glGenFramebuffersEXT", ExtFramebufferObject),
    BindFramebufferExt => ("glBindFramebufferEXT", ExtFramebufferObject),
    CheckFramebufferStatusExt => ("glCheckFramebufferStatusEXT", ExtFramebufferObject),
    CombinerParameteriNv => ("glCombinerParameteriNV", NvRegisterCombiners),
    CombinerInputNv => ("glCombinerInputNV", NvRegisterCombiners),
    CombinerOutputNv => ("glCombinerOutputNV", NvRegisterCombiners),
    FinalCombinerInputNv => ("glFinalCombinerInputNV", NvRegisterCombiners),
}

/// Entry-point table, indexed by [`GlProc`].
///
/// A lookup only succeeds when the entry resolved to a non-null address *and* the gating
/// extension was present in the scan that populated the table.
#[derive(Debug, Clone, Default)]
pub struct ProcRegistry {
    entries: Vec<Option<ProcAddress>>,
    features: FeatureSet,
}

impl ProcRegistry {
    /// Resolves every entry point against the current context.
    ///
    /// Entries whose gating extension is absent are not looked up at all.
    pub fn resolve(platform: &mut dyn GlPlatform, features: FeatureSet) -> Self {
        let entries = GlProc::ALL
            .iter()
            .map(|proc| {
                if !features.contains(proc.required_feature()) {
                    return None;
                }
                let address = platform.get_proc_address(proc.name());
                if address.is_none() {
                    warn!(
                        proc = proc.name(),
                        extension = %proc.required_feature(),
                        "extension advertised but entry point missing"
                    );
                }
                address
            })
            .collect::<Vec<_>>();
        debug!(
            resolved = entries.iter().filter(|e| e.is_some()).count(),
            "resolved GL entry points"
        );
        Self { entries, features }
    }

    pub fn get(&self, proc: GlProc) -> Option<ProcAddress> {
        if !self.features.contains(proc.required_feature()) {
            return None;
        }
        let index = GlProc::ALL.iter().position(|p| *p == proc)?;
        self.entries.get(index).copied().flatten()
    }

    /// Drops every resolved address.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
