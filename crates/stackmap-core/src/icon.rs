//! Catalog of resource icons.
//!
//! Icons are a closed set, grouped by provider and category the same way the
//! upstream icon packs are laid out on disk. When no icon directory is
//! available a node falls back to a category specific shape and fill color.

use std::{fmt, path::PathBuf};

/// Cloud provider owning an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Aws,
}

impl Provider {
    /// Directory name of the provider inside an icon pack.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Aws => "aws",
        }
    }
}

/// Service category an icon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Compute,
    Devtools,
    Management,
    Network,
    Storage,
}

impl Category {
    /// Directory name of the category inside a provider directory.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Devtools => "devtools",
            Self::Management => "management",
            Self::Network => "network",
            Self::Storage => "storage",
        }
    }

    /// Fill color used when the icon image is not available.
    pub fn fill_color(self) -> &'static str {
        match self {
            Self::Compute => "#ED7100",
            Self::Devtools => "#C925D1",
            Self::Management => "#E7157B",
            Self::Network => "#8C4FFF",
            Self::Storage => "#7AA116",
        }
    }

    /// Graphviz shape used when the icon image is not available.
    pub fn fallback_shape(self) -> &'static str {
        match self {
            Self::Compute => "box3d",
            Self::Devtools => "component",
            Self::Management => "folder",
            Self::Network => "hexagon",
            Self::Storage => "cylinder",
        }
    }
}

/// A resource icon from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    // compute
    Ec2,
    Lambda,
    // devtools
    CloudDevelopmentKit,
    // management
    CloudformationStack,
    // network
    Vpc,
    PublicSubnet,
    InternetGateway,
    Nacl,
    // storage
    ElasticBlockStore,
    SimpleStorageService,
}

impl Icon {
    /// Every icon in the catalog, in declaration order.
    pub const ALL: [Icon; 10] = [
        Icon::Ec2,
        Icon::Lambda,
        Icon::CloudDevelopmentKit,
        Icon::CloudformationStack,
        Icon::Vpc,
        Icon::PublicSubnet,
        Icon::InternetGateway,
        Icon::Nacl,
        Icon::ElasticBlockStore,
        Icon::SimpleStorageService,
    ];

    pub fn provider(self) -> Provider {
        Provider::Aws
    }

    pub fn category(self) -> Category {
        match self {
            Self::Ec2 | Self::Lambda => Category::Compute,
            Self::CloudDevelopmentKit => Category::Devtools,
            Self::CloudformationStack => Category::Management,
            Self::Vpc | Self::PublicSubnet | Self::InternetGateway | Self::Nacl => {
                Category::Network
            }
            Self::ElasticBlockStore | Self::SimpleStorageService => Category::Storage,
        }
    }

    /// File stem of the icon image.
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Ec2 => "ec2",
            Self::Lambda => "lambda",
            Self::CloudDevelopmentKit => "cloud-development-kit",
            Self::CloudformationStack => "cloudformation-stack",
            Self::Vpc => "vpc",
            Self::PublicSubnet => "public-subnet",
            Self::InternetGateway => "internet-gateway",
            Self::Nacl => "nacl",
            Self::ElasticBlockStore => "elastic-block-store-ebs",
            Self::SimpleStorageService => "simple-storage-service-s3",
        }
    }

    /// Relative path of the icon image inside an icon pack,
    /// e.g. `aws/compute/ec2.png`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackmap_core::icon::Icon;
    ///
    /// let path = Icon::PublicSubnet.relative_path();
    /// assert_eq!(path.to_str(), Some("aws/network/public-subnet.png"));
    /// ```
    pub fn relative_path(self) -> PathBuf {
        PathBuf::from(self.provider().dir_name())
            .join(self.category().dir_name())
            .join(format!("{}.png", self.resource_name()))
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.provider().dir_name(),
            self.category().dir_name(),
            self.resource_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(Icon::Ec2.category(), Category::Compute);
        assert_eq!(Icon::CloudDevelopmentKit.category(), Category::Devtools);
        assert_eq!(Icon::CloudformationStack.category(), Category::Management);
        assert_eq!(Icon::Vpc.category(), Category::Network);
        assert_eq!(Icon::SimpleStorageService.category(), Category::Storage);
    }

    #[test]
    fn test_resource_names_are_unique() {
        let names: HashSet<_> = Icon::ALL.iter().map(|icon| icon.to_string()).collect();
        assert_eq!(names.len(), Icon::ALL.len());
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            Icon::CloudformationStack.relative_path(),
            PathBuf::from("aws/management/cloudformation-stack.png")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Icon::Ec2.to_string(), "aws/compute/ec2");
    }
}
