use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::errors::ConfigError;

/// AWS regions the gateway provider can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AwsRegion {
    AfSouth1,
    ApEast1,
    ApNortheast1,
    ApNortheast2,
    ApNortheast3,
    ApSouth1,
    ApSouth2,
    ApSoutheast1,
    ApSoutheast2,
    ApSoutheast3,
    ApSoutheast4,
    CaCentral1,
    CaWest1,
    CnNorth1,
    CnNorthwest1,
    EuCentral1,
    EuCentral2,
    EuNorth1,
    EuSouth1,
    EuSouth2,
    EuWest1,
    EuWest2,
    EuWest3,
    IlCentral1,
    MeCentral1,
    MeSouth1,
    SaEast1,
    UsEast1,
    UsEast2,
    UsGovEast1,
    UsGovWest1,
    UsWest1,
    UsWest2,
}

impl AwsRegion {
    pub const ALL: [AwsRegion; 33] = [
        AwsRegion::AfSouth1,
        AwsRegion::ApEast1,
        AwsRegion::ApNortheast1,
        AwsRegion::ApNortheast2,
        AwsRegion::ApNortheast3,
        AwsRegion::ApSouth1,
        AwsRegion::ApSouth2,
        AwsRegion::ApSoutheast1,
        AwsRegion::ApSoutheast2,
        AwsRegion::ApSoutheast3,
        AwsRegion::ApSoutheast4,
        AwsRegion::CaCentral1,
        AwsRegion::CaWest1,
        AwsRegion::CnNorth1,
        AwsRegion::CnNorthwest1,
        AwsRegion::EuCentral1,
        AwsRegion::EuCentral2,
        AwsRegion::EuNorth1,
        AwsRegion::EuSouth1,
        AwsRegion::EuSouth2,
        AwsRegion::EuWest1,
        AwsRegion::EuWest2,
        AwsRegion::EuWest3,
        AwsRegion::IlCentral1,
        AwsRegion::MeCentral1,
        AwsRegion::MeSouth1,
        AwsRegion::SaEast1,
        AwsRegion::UsEast1,
        AwsRegion::UsEast2,
        AwsRegion::UsGovEast1,
        AwsRegion::UsGovWest1,
        AwsRegion::UsWest1,
        AwsRegion::UsWest2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AwsRegion::AfSouth1 => "af-south-1",
            AwsRegion::ApEast1 => "ap-east-1",
            AwsRegion::ApNortheast1 => "ap-northeast-1",
            AwsRegion::ApNortheast2 => "ap-northeast-2",
            AwsRegion::ApNortheast3 => "ap-northeast-3",
            AwsRegion::ApSouth1 => "ap-south-1",
            AwsRegion::ApSouth2 => "ap-south-2",
            AwsRegion::ApSoutheast1 => "ap-southeast-1",
            AwsRegion::ApSoutheast2 => "ap-southeast-2",
            AwsRegion::ApSoutheast3 => "ap-southeast-3",
            AwsRegion::ApSoutheast4 => "ap-southeast-4",
            AwsRegion::CaCentral1 => "ca-central-1",
            AwsRegion::CaWest1 => "ca-west-1",
            AwsRegion::CnNorth1 => "cn-north-1",
            AwsRegion::CnNorthwest1 => "cn-northwest-1",
            AwsRegion::EuCentral1 => "eu-central-1",
            AwsRegion::EuCentral2 => "eu-central-2",
            AwsRegion::EuNorth1 => "eu-north-1",
            AwsRegion::EuSouth1 => "eu-south-1",
            AwsRegion::EuSouth2 => "eu-south-2",
            AwsRegion::EuWest1 => "eu-west-1",
            AwsRegion::EuWest2 => "eu-west-2",
            AwsRegion::EuWest3 => "eu-west-3",
            AwsRegion::IlCentral1 => "il-central-1",
            AwsRegion::MeCentral1 => "me-central-1",
            AwsRegion::MeSouth1 => "me-south-1",
            AwsRegion::SaEast1 => "sa-east-1",
            AwsRegion::UsEast1 => "us-east-1",
            AwsRegion::UsEast2 => "us-east-2",
            AwsRegion::UsGovEast1 => "us-gov-east-1",
            AwsRegion::UsGovWest1 => "us-gov-west-1",
            AwsRegion::UsWest1 => "us-west-1",
            AwsRegion::UsWest2 => "us-west-2",
        }
    }
}

impl FromStr for AwsRegion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AwsRegion::ALL
            .iter()
            .copied()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidRegion(s.to_string()))
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AwsRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
