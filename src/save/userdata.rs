use super::platform::Platform;

/// one decrypted per-character blob, ordered by slot index
#[derive(Debug, Clone)]
pub struct UserData {
    pub index: usize,
    pub bytes: Vec<u8>,
}

impl UserData {
    /// file name the blob would carry on disk, matching the original tools
    pub fn name(&self, platform: Platform) -> String {
        match platform {
            Platform::Pc => format!("USERDATA_{:02}", self.index),
            Platform::Console => format!("userdata{}", self.index),
        }
    }

    /// materialize all blobs into a directory for offline inspection
    pub fn write_all(
        blobs: &[UserData],
        platform: Platform,
        dir: &std::path::Path,
    ) -> crate::error::Result<()> {
        std::fs::create_dir_all(dir)?;
        for blob in blobs {
            std::fs::write(dir.join(blob.name(platform)), &blob.bytes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_names_by_platform() {
        let blob = UserData {
            index: 3,
            bytes: vec![],
        };
        assert_eq!(blob.name(Platform::Pc), "USERDATA_03");
        assert_eq!(blob.name(Platform::Console), "userdata3");
    }
}
