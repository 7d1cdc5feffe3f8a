// We define a single public Error type that wraps a private ErrorKind. The
// no_std crate keeps returning `&'static str` (it has no allocator to build
// richer messages with), and we wrap those strings here.

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Clone, Debug)]
enum ErrorKind {
    /// An error that occurs when a problematic bin specification is provided
    /// (e.g. a non-positive bin width or a bin width that exceeds the range)
    BinSpec(BinSpecError),
    /// An error that occurs when x & y coordinate sequences have different
    /// lengths
    CoordinateLength(CoordinateLengthError),
    /// An error that occurs (in strict mode) when an estimator denominator
    /// bin holds zero pairs
    DegenerateBin(DegenerateBinError),
    /// An error that occurs when an unknown estimator name is specified
    EstimatorName(EstimatorNameError),
    /// An error that occurs when a point generator receives a parameter it
    /// can't work with
    GeneratorParameter(GeneratorParameterError),
    /// An error that occurs (in strict mode) when a catalog has fewer than 2
    /// points
    InsufficientData(InsufficientDataError),
    /// wraps the stringly errors from `twopcf_nostd_internal`
    InternalLegacyAdHoc(InternalLegacyAdHocError),
    /// An error that occurs when a required configuration parameter was never
    /// specified
    MissingParameter(MissingParameterError),
}

// define constructor methods for Error
impl Error {
    /// produce an error indicating that a problematic bin specification was
    /// provided
    pub(crate) fn bin_spec(who: &'static str, what: &'static str) -> Self {
        Error {
            kind: ErrorKind::BinSpec(BinSpecError { who, what }),
        }
    }

    /// produce an error indicating that x & y have different lengths
    pub(crate) fn coordinate_length(n_x: usize, n_y: usize) -> Self {
        Error {
            kind: ErrorKind::CoordinateLength(CoordinateLengthError { n_x, n_y }),
        }
    }

    /// produce an error indicating that an estimator would divide by a bin
    /// holding zero pairs
    pub(crate) fn degenerate_bin(
        estimator: &'static str,
        denominator: &'static str,
        bin_index: usize,
    ) -> Self {
        Error {
            kind: ErrorKind::DegenerateBin(DegenerateBinError {
                estimator,
                denominator,
                bin_index,
            }),
        }
    }

    /// produce an error indicating that an unknown estimator name was
    /// specified
    pub(crate) fn estimator_name(actual: String, choices: Vec<String>) -> Self {
        Error {
            kind: ErrorKind::EstimatorName(EstimatorNameError { actual, choices }),
        }
    }

    /// produce an error indicating that a generator parameter is invalid
    pub(crate) fn generator_parameter(generator: &'static str, what: &'static str) -> Self {
        Error {
            kind: ErrorKind::GeneratorParameter(GeneratorParameterError { generator, what }),
        }
    }

    /// produce an error indicating that a catalog holds too few points
    pub(crate) fn insufficient_data(catalog: &'static str, n_points: usize) -> Self {
        Error {
            kind: ErrorKind::InsufficientData(InsufficientDataError { catalog, n_points }),
        }
    }

    /// wraps a legacy internal error string
    pub(crate) fn internal_legacy_adhoc(message: &'static str) -> Self {
        Error {
            kind: ErrorKind::InternalLegacyAdHoc(InternalLegacyAdHocError(message)),
        }
    }

    /// produce an error indicating that a required parameter is missing
    pub(crate) fn missing_parameter(name: &'static str) -> Self {
        Error {
            kind: ErrorKind::MissingParameter(MissingParameterError { name }),
        }
    }

    /// `true` when the error was produced because a catalog held fewer than 2
    /// points
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self.kind, ErrorKind::InsufficientData(_))
    }

    /// `true` when the error was produced because an estimator denominator
    /// bin held zero pairs
    pub fn is_degenerate_bin(&self) -> bool {
        matches!(self.kind, ErrorKind::DegenerateBin(_))
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for ErrorKind {}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::BinSpec(ref err) => err.fmt(f),
            ErrorKind::CoordinateLength(ref err) => err.fmt(f),
            ErrorKind::DegenerateBin(ref err) => err.fmt(f),
            ErrorKind::EstimatorName(ref err) => err.fmt(f),
            ErrorKind::GeneratorParameter(ref err) => err.fmt(f),
            ErrorKind::InsufficientData(ref err) => err.fmt(f),
            ErrorKind::InternalLegacyAdHoc(ref msg) => msg.fmt(f),
            ErrorKind::MissingParameter(ref err) => err.fmt(f),
        }
    }
}

/// An error that occurs when a problematic bin specification is provided
#[derive(Clone, Debug)]
struct BinSpecError {
    who: &'static str,
    what: &'static str,
}

impl std::error::Error for BinSpecError {}

impl core::fmt::Display for BinSpecError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let BinSpecError { who, what } = self;
        write!(f, "problem with {who}: {what}")
    }
}

/// An error that occurs when x & y coordinate sequences have different
/// lengths
#[derive(Clone, Debug)]
struct CoordinateLengthError {
    n_x: usize,
    n_y: usize,
}

impl std::error::Error for CoordinateLengthError {}

impl core::fmt::Display for CoordinateLengthError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "received {} x coordinates and {} y coordinates. Each point needs both",
            self.n_x, self.n_y
        )
    }
}

/// An error that occurs when an estimator would divide by an empty bin
#[derive(Clone, Debug)]
struct DegenerateBinError {
    estimator: &'static str,
    denominator: &'static str,
    bin_index: usize,
}

impl std::error::Error for DegenerateBinError {}

impl core::fmt::Display for DegenerateBinError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "the {} estimator divides by {}, which holds no pairs in bin {}",
            self.estimator, self.denominator, self.bin_index
        )
    }
}

/// An error occurs when an unknown estimator name is specified
#[derive(Clone, Debug)]
struct EstimatorNameError {
    actual: String,
    choices: Vec<String>,
}

impl std::error::Error for EstimatorNameError {}

impl core::fmt::Display for EstimatorNameError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{} is not an estimator name. Choices include: {:?}",
            self.actual, self.choices
        )
    }
}

/// An error that occurs when a point generator receives a bad parameter
#[derive(Clone, Debug)]
struct GeneratorParameterError {
    generator: &'static str,
    what: &'static str,
}

impl std::error::Error for GeneratorParameterError {}

impl core::fmt::Display for GeneratorParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "the {} generator {}", self.generator, self.what)
    }
}

/// An error that occurs when a catalog has fewer than 2 points
#[derive(Clone, Debug)]
struct InsufficientDataError {
    catalog: &'static str,
    n_points: usize,
}

impl std::error::Error for InsufficientDataError {}

impl core::fmt::Display for InsufficientDataError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "the {} catalog holds {} point(s), at least 2 are required to form a pair",
            self.catalog, self.n_points
        )
    }
}

/// A type that wraps the string errors from `twopcf_nostd_internal`.
#[derive(Clone)]
struct InternalLegacyAdHocError(&'static str);

impl std::error::Error for InternalLegacyAdHocError {}

impl core::fmt::Display for InternalLegacyAdHocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::fmt::Debug for InternalLegacyAdHocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.0, f)
    }
}

/// An error that occurs when a required parameter was never specified
#[derive(Clone, Debug)]
struct MissingParameterError {
    name: &'static str,
}

impl std::error::Error for MissingParameterError {}

impl core::fmt::Display for MissingParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "the {} parameter was never specified", self.name)
    }
}
