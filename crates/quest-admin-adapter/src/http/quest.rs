/*
[INPUT]:  Quest, boost and NFT metadata payloads with admin JWT
[OUTPUT]: Quest records and creation acknowledgements
[POS]:    HTTP layer - admin quest endpoints
[UPDATE]: When adding quest fields or reward endpoints
*/

use crate::http::{QuestAdminClient, Result};
use crate::types::{
    ActionResponse, CreateBoost, CreateNftUri, CreateQuest, CreatedRecord, NftUri, QuestDocument,
    UpdateBoost, UpdateQuest,
};
use reqwest::Method;

impl QuestAdminClient {
    /// Fetch a quest with its boosts and banner
    ///
    /// GET /admin/quest/get_quest?id={id}
    pub async fn get_quest_by_id(&self, quest_id: i64) -> Result<Option<QuestDocument>> {
        let endpoint = format!("/admin/quest/get_quest?id={}", quest_id);
        let builder = self.admin_request(Method::GET, &endpoint)?;
        self.send_optional_json(builder).await
    }

    /// Create a quest
    ///
    /// POST /admin/quest/create
    pub async fn create_quest(&self, req: &CreateQuest) -> Result<CreatedRecord> {
        let builder = self.admin_request(Method::POST, "/admin/quest/create")?.json(req);
        self.send_json(builder).await
    }

    /// Update populated quest fields
    ///
    /// POST /admin/quest/update
    pub async fn update_quest(&self, req: &UpdateQuest) -> Result<ActionResponse> {
        let builder = self.admin_request(Method::POST, "/admin/quest/update")?.json(req);
        self.send_json(builder).await
    }

    /// Attach a boost prize pool to a quest
    ///
    /// POST /admin/quest_boost/create_boost
    pub async fn create_boost(&self, req: &CreateBoost) -> Result<CreatedRecord> {
        let builder = self
            .admin_request(Method::POST, "/admin/quest_boost/create_boost")?
            .json(req);
        self.send_json(builder).await
    }

    /// POST /admin/quest_boost/update_boost
    pub async fn update_boost(&self, req: &UpdateBoost) -> Result<ActionResponse> {
        let builder = self
            .admin_request(Method::POST, "/admin/quest_boost/update_boost")?
            .json(req);
        self.send_json(builder).await
    }

    /// GET /admin/nft_uri/get_nft_uri?id={quest_id}
    pub async fn get_nft_uri_by_quest_id(&self, quest_id: i64) -> Result<Option<NftUri>> {
        let endpoint = format!("/admin/nft_uri/get_nft_uri?id={}", quest_id);
        let builder = self.admin_request(Method::GET, &endpoint)?;
        self.send_optional_json(builder).await
    }

    /// POST /admin/nft_uri/create
    pub async fn create_nft_uri(&self, req: &CreateNftUri) -> Result<CreatedRecord> {
        let builder = self.admin_request(Method::POST, "/admin/nft_uri/create")?.json(req);
        self.send_json(builder).await
    }
}
